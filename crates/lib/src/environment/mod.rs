//! Environment validation.
//!
//! Before any build runs, the required tools must resolve on `PATH`. An
//! optional `.env` file supplies extra variables; they are collected into a
//! [`BuildEnv`] overlay that is applied to the build process rather than to
//! this process.

pub mod dotenv;
pub mod tools;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

pub use dotenv::{DotenvError, EnvEntry};
pub use tools::find_executable;

#[derive(Debug, Error)]
pub enum EnvError {
  /// A required executable is not on `PATH`.
  #[error("`{0}` binary not found, cannot proceed")]
  MissingTool(String),

  #[error("failed to read {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed env file {}: {source}", .path.display())]
  Dotenv {
    path: PathBuf,
    #[source]
    source: DotenvError,
  },
}

/// Variables layered over the inherited environment of the build process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnv {
  entries: Vec<EnvEntry>,
}

impl BuildEnv {
  pub fn new(entries: Vec<EnvEntry>) -> Self {
    Self { entries }
  }

  pub fn entries(&self) -> &[EnvEntry] {
    &self.entries
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Looks up `key` in the overlay, falling back to the process environment.
  pub fn get(&self, key: &str) -> Option<String> {
    self
      .entries
      .iter()
      .find(|entry| entry.key == key)
      .map(|entry| entry.value.clone())
      .or_else(|| std::env::var(key).ok())
  }

  /// Sets every overlay entry on `command`, replacing inherited values.
  pub fn apply(&self, command: &mut tokio::process::Command) {
    for entry in &self.entries {
      command.env(&entry.key, &entry.value);
    }
  }
}

/// Checks that every tool in `tools` is on `PATH`, then loads `dotenv_path`
/// if it exists.
///
/// Tools are checked in order and the first missing one is reported.
pub fn check_environment(tools: &[&str], dotenv_path: &Path) -> Result<BuildEnv, EnvError> {
  for tool in tools {
    match find_executable(tool) {
      Some(path) => debug!(tool = %tool, path = %path.display(), "found required tool"),
      None => return Err(EnvError::MissingTool(tool.to_string())),
    }
  }

  load_dotenv(dotenv_path)
}

/// Loads the overlay from `path`. A missing file yields an empty overlay.
pub fn load_dotenv(path: &Path) -> Result<BuildEnv, EnvError> {
  if !path.exists() {
    debug!(path = %path.display(), "no env file");
    return Ok(BuildEnv::default());
  }

  let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
  info!(path = %absolute.display(), "found .env file");

  let content = std::fs::read_to_string(path).map_err(|source| EnvError::Read {
    path: absolute.clone(),
    source,
  })?;
  let entries = dotenv::parse(&content).map_err(|source| EnvError::Dotenv {
    path: absolute.clone(),
    source,
  })?;

  info!("applying parsed values");
  for entry in &entries {
    info!("set {}", entry.key);
  }

  Ok(BuildEnv::new(entries))
}
