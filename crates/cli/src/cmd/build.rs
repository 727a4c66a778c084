//! The build command.
//!
//! Validates the environment, then runs exactly one batch: either the
//! diagnostic test artifact or the full package matrix.

use std::path::PathBuf;

use anyhow::Result;
use tracing::{error, info};

use mlcache_lib::build::{BuildError, BuildOptions, BuildRequest, run_build_batch};
use mlcache_lib::consts::REQUIRED_TOOLS;
use mlcache_lib::environment::check_environment;
use mlcache_lib::target::{default_matrix, test_batch};

pub struct BuildArgs {
  pub revision: Option<String>,
  pub test: bool,
  pub env_file: PathBuf,
  pub options: BuildOptions,
}

/// Execute the build command.
///
/// A missing tool, a malformed env file, or a builder that cannot be started
/// exits with status 1. A batch whose builder exits non-zero is logged and
/// the command still succeeds: targets that did build have been pushed, and
/// the failures are reported in the log.
pub async fn cmd_build(args: BuildArgs) -> Result<()> {
  let env = match check_environment(&REQUIRED_TOOLS, &args.env_file) {
    Ok(env) => env,
    Err(e) => {
      error!("{}", e);
      std::process::exit(1);
    }
  };

  if let Some(rev) = args.revision.as_deref().filter(|rev| !rev.is_empty()) {
    info!("building python packages against nixpkgs@{}", rev);
  }

  let targets = if args.test {
    info!("Running diagnostic test build...");
    test_batch()
  } else {
    default_matrix()
  };

  let request = BuildRequest::new(targets, args.revision);

  match run_build_batch(&request, &env, &args.options).await {
    Ok(()) => Ok(()),
    Err(BuildError::BatchFailed { targets, detail }) => {
      error!(targets = %targets.join(", "), error = %detail, "error building packages");
      Ok(())
    }
    Err(e) => {
      error!("{}", e);
      std::process::exit(1);
    }
  }
}
