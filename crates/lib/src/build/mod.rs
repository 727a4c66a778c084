//! Build batch invocation.
//!
//! A batch is one `nix build` over an ordered list of targets, wrapped in
//! `cachix watch-exec` so every output realized during the build is pushed
//! to the binary cache. The builder keeps going past per-target failures.

pub mod types;

use std::fmt;

use tracing::{debug, info, warn};

use crate::consts::{NIXPKGS_FLAKE_URL, OVERRIDE_INPUT, REVISION_ENV_VAR};
use crate::environment::BuildEnv;

pub use types::{BuildError, BuildOptions, BuildRequest};

/// The full argument vector for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
  program: String,
  args: Vec<String>,
}

impl BuildCommand {
  /// Assembles `<cache_tool> watch-exec <cache> -- <build_tool> build ...`.
  ///
  /// Targets are appended last, in the order given.
  pub fn new(options: &BuildOptions, targets: &[String], revision: Option<&str>) -> Self {
    let mut args: Vec<String> = vec![
      "watch-exec".into(),
      options.cache.clone(),
      "--".into(),
      options.build_tool.clone(),
      "build".into(),
      "--keep-going".into(),
      "--print-build-logs".into(),
    ];

    if let Some(rev) = revision {
      args.push("--override-input".into());
      args.push(OVERRIDE_INPUT.into());
      args.push(format!("{}/{}", NIXPKGS_FLAKE_URL, rev));
    }

    args.extend(targets.iter().cloned());

    Self {
      program: options.cache_tool.clone(),
      args,
    }
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  pub fn args(&self) -> &[String] {
    &self.args
  }

  /// Builds the process with the overlay applied and stdio inherited.
  pub fn to_command(&self, env: &BuildEnv) -> tokio::process::Command {
    let mut command = tokio::process::Command::new(&self.program);
    command.args(&self.args);
    env.apply(&mut command);
    command
  }
}

impl fmt::Display for BuildCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Picks the nixpkgs revision override.
///
/// A non-empty explicit revision wins; otherwise a non-empty `NIXPKGS_REV`
/// from the overlay or the process environment is used.
pub fn resolve_revision(explicit: Option<&str>, env: &BuildEnv) -> Option<String> {
  explicit
    .filter(|rev| !rev.is_empty())
    .map(str::to_string)
    .or_else(|| env.get(REVISION_ENV_VAR).filter(|rev| !rev.is_empty()))
}

/// Runs one build batch and waits for it to finish.
///
/// Returns [`BuildError::BatchFailed`] when the builder exits non-zero, with
/// every attempted target attached.
pub async fn run_build_batch(request: &BuildRequest, env: &BuildEnv, options: &BuildOptions) -> Result<(), BuildError> {
  if request.targets.is_empty() {
    return Err(BuildError::NoTargets);
  }

  let revision = resolve_revision(request.revision.as_deref(), env);
  if let Some(rev) = &revision {
    warn!(revision = %rev, "Overriding nixpkgs revision");
  }

  let command = BuildCommand::new(options, &request.targets, revision.as_deref());
  info!(targets = %request.targets.join(", "), "building packages");

  if options.dry_run {
    info!(command = %command, "dry run, not invoking builder");
    return Ok(());
  }

  debug!(command = %command, "spawning builder");
  let status = command
    .to_command(env)
    .status()
    .await
    .map_err(|source| BuildError::Spawn {
      program: command.program().to_string(),
      source,
    })?;

  if !status.success() {
    return Err(BuildError::BatchFailed {
      targets: request.targets.clone(),
      detail: format!("command '{}' returned {}", command, status),
    });
  }

  debug!("build batch finished");
  Ok(())
}
