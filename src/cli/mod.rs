//! CLI module
//!
//! Provides:
//! - Argument parsing (`serve`, `ask`)
//! - Tracing subscriber setup
//! - Mode dispatch

pub mod args;
pub mod dispatch;
pub mod logging;

// Re-exports
pub use args::{parse_args, Args, AskArgs, LogFormat, Mode, ServeArgs};
pub use dispatch::{run_cli_mode, ExitCode};
pub use logging::init_logging;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
