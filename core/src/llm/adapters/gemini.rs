//! Gemini adapter
//!
//! Calls `models/{model}:generateContent` with the key as a query parameter.
//!
//! Base URL: https://generativelanguage.googleapis.com/v1beta

use crate::llm::adapters::transport::{HttpTransport, Transport};
use crate::llm::adapters::AdapterError;
use crate::llm::types::{ApiKey, GenerateContentRequest, PromptEnvelope};
use tracing::debug;

pub use crate::llm::adapters::gemini_parse::{block_reason, extract_text};

/// Default Gemini API root
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Gemini `generateContent` adapter
#[derive(Debug)]
pub struct GeminiAdapter {
    /// API root (e.g., https://generativelanguage.googleapis.com/v1beta)
    base_url: String,
    /// Model name (e.g., gemini-1.5-flash)
    model: String,
    /// HTTP transport
    transport: Transport,
}

impl GeminiAdapter {
    /// Create adapter over the given transport
    pub fn with_transport(base_url: String, model: String, transport: Transport) -> Self {
        Self {
            base_url,
            model,
            transport,
        }
    }

    /// Full endpoint URL, without the key
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Build `generateContent` request body
    pub fn build_request(&self, envelope: &PromptEnvelope) -> Result<String, AdapterError> {
        Ok(serde_json::to_string(&GenerateContentRequest::from(envelope))?)
    }

    /// Issue one `generateContent` call and return the raw 2xx body
    pub async fn generate_content(
        &self,
        api_key: &ApiKey,
        envelope: &PromptEnvelope,
    ) -> Result<String, AdapterError> {
        let url = self.endpoint();
        let body = self.build_request(envelope)?;
        debug!(model = %self.model, "Calling Gemini generateContent");

        self.transport
            .post_json(&url, &[("key", api_key.expose())], &body)
            .await
    }
}
