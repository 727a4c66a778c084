use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use mlcache_lib::build::BuildOptions;
use mlcache_lib::consts::{APP_NAME, CACHE_NAME, DOTENV_FILE};

mod cmd;

/// mlcache - build ROCm Python packages and push them to the binary cache
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// What to build: the full package matrix or the diagnostic test artifact
  #[arg(value_enum, default_value_t = Mode::Full)]
  mode: Mode,

  /// Override the nixpkgs revision with the provided git commit id
  #[arg(short, long)]
  revision: Option<String>,

  /// Build and push a test artifact to verify environment configuration
  #[arg(short = 'T', long)]
  test: bool,

  /// Binary cache to push build outputs to
  #[arg(long, default_value = CACHE_NAME)]
  cache: String,

  /// Env file merged into the build environment, if present
  #[arg(long, default_value = DOTENV_FILE)]
  env_file: PathBuf,

  /// Print the build command instead of running it
  #[arg(long)]
  dry_run: bool,

  /// Increase log verbosity (-v debug, -vv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
  /// Every supported package for every supported Python version
  Full,
  /// Only the diagnostic test artifact (same as --test)
  Test,
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  mlcache_lib::log::init(cli.verbose)?;

  let args = cmd::BuildArgs {
    revision: cli.revision,
    test: cli.test || cli.mode == Mode::Test,
    env_file: cli.env_file,
    options: BuildOptions {
      cache: cli.cache,
      dry_run: cli.dry_run,
      ..Default::default()
    },
  };

  cmd::cmd_build(args).await
}
