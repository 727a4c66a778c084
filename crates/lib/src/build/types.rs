//! Types for build batch execution.

use thiserror::Error;

use crate::consts::{BUILD_TOOL, CACHE_NAME, CACHE_TOOL};

/// An ordered batch of targets submitted to a single builder invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
  pub targets: Vec<String>,
  /// Explicit nixpkgs revision; when unset, `NIXPKGS_REV` is consulted.
  pub revision: Option<String>,
}

impl BuildRequest {
  pub fn new(targets: Vec<String>, revision: Option<String>) -> Self {
    Self { targets, revision }
  }
}

/// How the batch is invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
  /// Binary cache receiving the build outputs.
  pub cache: String,
  pub cache_tool: String,
  pub build_tool: String,
  /// Log the assembled command instead of running it.
  pub dry_run: bool,
}

impl Default for BuildOptions {
  fn default() -> Self {
    Self {
      cache: CACHE_NAME.to_string(),
      cache_tool: CACHE_TOOL.to_string(),
      build_tool: BUILD_TOOL.to_string(),
      dry_run: false,
    }
  }
}

/// Errors that can occur while running a build batch.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The request contained no targets.
  #[error("no build targets given")]
  NoTargets,

  /// The cache wrapper could not be started.
  #[error("failed to spawn {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The builder ran and exited non-zero. Some targets may still have been
  /// built and pushed, since the builder keeps going past failures.
  #[error("batch build failed for {}: {detail}", .targets.join(", "))]
  BatchFailed { targets: Vec<String>, detail: String },
}
