//! Leveled, timestamped key-value log lines.
//!
//! Call sites use the `tracing` macros with ordered fields:
//!
//! ```ignore
//! tracing::info!(targets = %ids, "building packages");
//! ```
//!
//! which renders as `2024-05-01T12:00:00  INFO  building packages targets=...`.
//! ERROR and WARN lines go to stderr, everything else to stdout.

mod format;
mod writer;

use std::io::{self, IsTerminal};

use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

pub use format::{LineFormat, render_line};
pub use writer::StreamRouter;

#[derive(Debug, Error)]
pub enum LogError {
  #[error("failed to install logger: {0}")]
  Install(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Maps the `-v` count to the default level: INFO, then DEBUG, then TRACE.
pub fn verbosity_level(verbose: u8) -> LevelFilter {
  match verbose {
    0 => LevelFilter::INFO,
    1 => LevelFilter::DEBUG,
    _ => LevelFilter::TRACE,
  }
}

/// Builds the event filter, letting `RUST_LOG` override the verbosity default.
pub fn env_filter(verbose: u8) -> EnvFilter {
  EnvFilter::builder()
    .with_default_directive(verbosity_level(verbose).into())
    .from_env_lossy()
}

/// Colors only when both streams are terminals and `NO_COLOR` is unset.
pub fn use_ansi() -> bool {
  std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal() && io::stderr().is_terminal()
}

/// Builds a subscriber writing ERROR/WARN lines to `err` and the rest to `out`.
pub fn subscriber<E, O>(filter: EnvFilter, ansi: bool, err: E, out: O) -> impl Subscriber + Send + Sync + 'static
where
  E: for<'w> MakeWriter<'w> + Send + Sync + 'static,
  O: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_ansi(ansi)
    .event_format(LineFormat)
    .with_writer(StreamRouter::new(err, out))
    .finish()
}

/// Installs the global logger on stdout/stderr.
pub fn init(verbose: u8) -> Result<(), LogError> {
  let subscriber = subscriber(env_filter(verbose), use_ansi(), io::stderr, io::stdout);
  tracing::subscriber::set_global_default(subscriber)?;
  Ok(())
}
