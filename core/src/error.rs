//! Caller-facing error taxonomy
//!
//! Only request and deployment problems surface as errors. Upstream provider
//! failures are absorbed by the handler and never reach this type.

use http::StatusCode;

/// Errors returned to the caller of [`crate::ChatProxyHandler::handle`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProxyError {
    /// Request used a method other than POST
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Request body carried no usable `query`
    #[error("Query is required")]
    MissingQuery,

    /// No Gemini API key was configured for this process
    #[error("Server configuration error: API Key missing")]
    MissingApiKey,
}

impl ProxyError {
    /// HTTP status the error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::MissingQuery => StatusCode::BAD_REQUEST,
            ProxyError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body sent alongside the status
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
