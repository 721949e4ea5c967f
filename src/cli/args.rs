//! CLI argument parsing
//!
//! - `serve` (default): run the HTTP API
//! - `ask`: send one query through the proxy and print the answer

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Parsed CLI arguments
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "supportdesk", version, about = "Context-grounded support chat proxy for Gemini")]
pub struct Args {
    /// Configuration file (TOML); defaults to ./supportdesk.toml when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// CLI modes
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Mode {
    /// Run the HTTP API server
    Serve(ServeArgs),

    /// Ask one question and print the answer
    Ask(AskArgs),
}

#[derive(Debug, Clone, PartialEq, Default, ClapArgs)]
pub struct ServeArgs {
    /// Override server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Override server.port
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, ClapArgs)]
pub struct AskArgs {
    /// Context tag ("jobs" for UrbanFix, anything else for ReporFlow)
    #[arg(long)]
    pub context: Option<String>,

    /// Print the full JSON reply instead of the answer text
    #[arg(long)]
    pub json: bool,

    /// Question to ask
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

impl AskArgs {
    /// Words joined back into one query
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

impl Args {
    /// Mode to run; `serve` when none was given
    pub fn mode(&self) -> Mode {
        self.mode
            .clone()
            .unwrap_or_else(|| Mode::Serve(ServeArgs::default()))
    }
}

/// Parse CLI arguments from an iterator (program name first)
pub fn parse_args<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Args::try_parse_from(args)
}
