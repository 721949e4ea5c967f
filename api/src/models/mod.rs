//! API Models Module
//!
//! Wire-level types for the HTTP surface.

use serde::{Deserialize, Serialize};
use supportdesk_core::ServerSettings;

/// API server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// CORS origins; empty allows any origin
    pub allowed_origins: Vec<String>,
}

impl From<&ServerSettings> for ApiConfig {
    fn from(settings: &ServerSettings) -> Self {
        Self {
            host: settings.host.clone(),
            port: settings.port,
            allowed_origins: settings.allowed_origins.clone(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        (&ServerSettings::default()).into()
    }
}

/// Health check body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    /// Whether a Gemini key is configured
    pub api_key_configured: bool,
}

/// Error body: `{ "error": "<message>" }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
