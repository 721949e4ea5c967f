//! API Server Module
//!
//! Router construction and server startup.

use anyhow::Result;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{any, get},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use supportdesk_core::ChatProxyHandler;

use crate::handlers::{chat, health_check, ApiState};
use crate::models::ApiConfig;

/// Path served by the original hosted function
pub const GEMINI_ROUTE: &str = "/api/gemini";

/// Alias for the chat route
pub const CHAT_ROUTE: &str = "/api/chat";

/// Build the application router
pub fn build_router(state: Arc<ApiState>, config: &ApiConfig) -> Router {
    Router::new()
        // Chat: all verbs reach the handler, which rejects non-POST
        .route(GEMINI_ROUTE, any(chat))
        .route(CHAT_ROUTE, any(chat))
        // Health check
        .route("/health", get(health_check))
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for browser frontends; preflights never reach the handler
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Main API server
pub struct ApiServer {
    /// Server configuration
    config: ApiConfig,
    /// Shared state
    state: Arc<ApiState>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiConfig, handler: ChatProxyHandler) -> Self {
        let state = Arc::new(ApiState::new(handler));
        Self { config, state }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Start the API server
    pub async fn start(&self) -> Result<()> {
        info!(
            "Starting Supportdesk API server on {}:{}",
            self.config.host, self.config.port
        );

        if !self.state.handler.has_api_key() {
            warn!("GEMINI_API_KEY is not set; chat requests will answer 500");
        }

        let app = self.router();

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid listen address: {}", e))?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Supportdesk API server listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start API server: {}", e))?;

        info!("Supportdesk API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
