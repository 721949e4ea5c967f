//! CLI mode dispatch
//!
//! Loads configuration once, builds the shared handler and runs the
//! selected mode.

use crate::cli::{Args, AskArgs, Mode, Result, ServeArgs, EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_SUCCESS};
use http::Method;
use supportdesk_api::{ApiConfig, ApiServer};
use supportdesk_core::{ChatProxyHandler, ChatRequestBody, IncomingRequest, ProxyConfig};
use tracing::info;

/// Exit code wrapper for CLI operations
pub type ExitCode = i32;

/// Run the parsed CLI and return an exit code
pub async fn run_cli_mode(args: Args) -> ExitCode {
    let config = match ProxyConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_CONFIG_ERROR;
        }
    };

    let result = match args.mode() {
        Mode::Serve(serve) => run_serve(config, serve).await,
        Mode::Ask(ask) => run_ask(&config, ask).await,
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_FAILURE
        }
    }
}

async fn run_serve(config: ProxyConfig, overrides: ServeArgs) -> Result<ExitCode> {
    let mut api_config = ApiConfig::from(&config.server);
    if let Some(host) = overrides.host {
        api_config.host = host;
    }
    if let Some(port) = overrides.port {
        api_config.port = port;
    }

    info!(model = %config.gemini.model, "Building chat proxy");
    let handler = ChatProxyHandler::from_config(&config);
    let server = ApiServer::new(api_config, handler);

    server
        .start()
        .await
        .map_err(|e| crate::cli::Error::Server(e.to_string()))?;
    Ok(EXIT_SUCCESS)
}

async fn run_ask(config: &ProxyConfig, ask: AskArgs) -> Result<ExitCode> {
    let handler = ChatProxyHandler::from_config(config);
    let request = IncomingRequest::new(
        Method::POST,
        ChatRequestBody {
            query: Some(ask.query_text()),
            context: ask.context.clone(),
        },
    );

    match handler.handle(request).await {
        Ok(response) => {
            if ask.json {
                println!("{}", response.into_body());
            } else {
                println!("{}", response.text());
            }
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            if ask.json {
                println!("{}", serde_json::to_string(&e.to_json())?);
            } else {
                eprintln!("Error: {}", e);
            }
            Ok(EXIT_FAILURE)
        }
    }
}
