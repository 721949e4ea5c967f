//! Transport types
//!
//! Common types shared across transport implementations.

use async_trait::async_trait;

/// Upstream errors
///
/// Never surfaced to callers; the handler turns every variant into a
/// fallback reply.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Network error (connection refused, DNS, TLS, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// HTTP error (non-2xx status)
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        AdapterError::Json(err.to_string())
    }
}

/// Asynchronous HTTP transport
///
/// Abstraction over the HTTP client so adapters can run against
/// [`super::transport_fake::FakeTransport`] in tests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST a JSON body and return the response body on 2xx
    ///
    /// `query` is appended as URL query parameters. Non-2xx statuses map to
    /// [`AdapterError::Http`] carrying the response text.
    async fn post_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError>;
}
