//! Supportdesk CLI
//!
//! - `serve` (default): HTTP API with `/api/gemini`, `/api/chat`, `/health`
//! - `ask`: one-shot query from the terminal

use supportdesk::cli::{init_logging, parse_args, run_cli_mode};

#[tokio::main]
async fn main() {
    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    if let Err(e) = init_logging(args.log_format) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let exit_code = run_cli_mode(args).await;
    std::process::exit(exit_code);
}
