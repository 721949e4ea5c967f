//! Supportdesk: context-grounded support chat proxy for Gemini
//!
//! Binary-side wiring: CLI parsing, logging and mode dispatch. The proxy
//! itself lives in `supportdesk-core`; the HTTP surface in `supportdesk-api`.

pub mod cli;

pub use cli::{parse_args, run_cli_mode, Args, Mode};
