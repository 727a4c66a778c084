//! mlcache-lib: core logic for mlcache
//!
//! This crate provides everything the `mlcache` binary orchestrates:
//! - `environment`: required tool checks and the `.env` overlay
//! - `target`: build target identifiers and the package/version matrix
//! - `build`: assembling and running the cache-wrapped `nix build` batch
//! - `log`: leveled, timestamped key-value log lines

pub mod build;
pub mod consts;
pub mod environment;
pub mod log;
pub mod target;
