//! Tracing subscriber setup
//!
//! `RUST_LOG` controls filtering (default `info`). Output goes to stderr so
//! `ask` can print its answer cleanly on stdout.

use crate::cli::LogFormat;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Build the filter from `RUST_LOG`, falling back to `info`
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber
///
/// Returns an error when a subscriber is already installed.
pub fn init_logging(format: LogFormat) -> crate::cli::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| crate::cli::Error::Logging(e.to_string()))
}
