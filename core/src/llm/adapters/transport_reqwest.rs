//! Real HTTP transport using reqwest

use crate::llm::adapters::transport_types::{AdapterError, HttpTransport};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;

/// Real HTTP transport using reqwest
///
/// The underlying client pools connections and is safe to share across
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create transport with custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    fn map_error(&self, err: reqwest::Error) -> AdapterError {
        if err.is_timeout() {
            AdapterError::Timeout(self.timeout.as_millis() as u64)
        } else {
            // without_url keeps the key query parameter out of the message
            AdapterError::Network(err.without_url().to_string())
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::with_timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError> {
        debug!(url = %url, body_len = body.len(), timeout_ms = self.timeout.as_millis() as u64, "POST");

        let response = self
            .client
            .post(url)
            .query(query)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.timeout)
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_error(e))?;
        debug!(status = status.as_u16(), body_len = text.len(), "response");

        if !status.is_success() {
            return Err(AdapterError::Http {
                status: status.as_u16(),
                message: text,
            });
        }

        Ok(text)
    }
}
