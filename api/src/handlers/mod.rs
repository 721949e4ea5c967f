//! API Handlers Module
//!
//! Thin HTTP wrappers around [`ChatProxyHandler`]. Every verb on the chat
//! routes reaches the handler so the method check lives in one place.

use axum::{
    body::Bytes,
    debug_handler,
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use supportdesk_core::{ChatProxyHandler, IncomingRequest, ProxyError};

use crate::models::{ErrorResponse, HealthResponse};

/// Represents the state of the API server
pub struct ApiState {
    /// Chat proxy shared by all requests
    pub handler: ChatProxyHandler,
}

impl ApiState {
    pub fn new(handler: ChatProxyHandler) -> Self {
        Self { handler }
    }
}

/// Caller-facing error response
#[derive(Debug)]
pub struct ApiError(pub ProxyError);

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Health check endpoint
#[debug_handler]
pub async fn health_check(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "supportdesk-api".to_string(),
        api_key_configured: state.handler.has_api_key(),
    })
}

/// Chat endpoint
///
/// Success bodies are written as-is so provider replies pass through
/// byte-for-byte.
#[debug_handler]
pub async fn chat(
    State(state): State<Arc<ApiState>>,
    method: Method,
    body: Bytes,
) -> Result<Response, ApiError> {
    tracing::debug!("Chat request: {} ({} bytes)", method, body.len());

    let request = IncomingRequest::from_parts(method, &body);
    let response = state.handler.handle(request).await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        response.into_body(),
    )
        .into_response())
}
