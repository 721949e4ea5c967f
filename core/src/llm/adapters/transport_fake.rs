//! Fake transport for testing
//!
//! Replays a canned reply instead of making HTTP calls and records every
//! request it receives.

use crate::llm::adapters::transport_types::{AdapterError, HttpTransport};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Canned reply returned by [`FakeTransport`]
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// 2xx with this body
    Body(String),
    /// Non-2xx status with this body
    Status { status: u16, body: String },
    /// Connection-level failure
    NetworkError(String),
    /// Timeout after the given milliseconds
    Timeout(u64),
}

/// One request seen by the fake
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: String,
}

impl RecordedCall {
    /// Request body parsed as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// Shared view of the calls a [`FakeTransport`] received
pub type CallLog = Arc<Mutex<Vec<RecordedCall>>>;

/// Fake transport for testing (uses fixture strings)
#[derive(Debug)]
pub struct FakeTransport {
    reply: FakeReply,
    calls: CallLog,
}

impl FakeTransport {
    /// Create fake transport that answers 200 with `response`
    pub fn new(response: &str) -> Self {
        Self::with_reply(FakeReply::Body(response.to_string()))
    }

    /// Create fake transport that answers with a non-2xx status
    pub fn with_status(status: u16, body: &str) -> Self {
        Self::with_reply(FakeReply::Status {
            status,
            body: body.to_string(),
        })
    }

    /// Create fake transport that returns a network error
    pub fn with_error(msg: &str) -> Self {
        Self::with_reply(FakeReply::NetworkError(msg.to_string()))
    }

    pub fn with_reply(reply: FakeReply) -> Self {
        Self {
            reply,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle on the call log; stays valid after the transport is moved
    pub fn call_log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_else(|e| e.into_inner().len())
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn post_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError> {
        let call = RecordedCall {
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.to_string(),
        };
        match self.calls.lock() {
            Ok(mut calls) => calls.push(call),
            Err(poisoned) => poisoned.into_inner().push(call),
        }

        match &self.reply {
            FakeReply::Body(body) => Ok(body.clone()),
            FakeReply::Status { status, body } => Err(AdapterError::Http {
                status: *status,
                message: body.clone(),
            }),
            FakeReply::NetworkError(msg) => Err(AdapterError::Network(msg.clone())),
            FakeReply::Timeout(ms) => Err(AdapterError::Timeout(*ms)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_transport_basic() {
        let transport = FakeTransport::new("test response");
        let result = transport.post_json("http://test", &[], "{}").await;
        assert_eq!(result.unwrap(), "test response");
    }

    #[tokio::test]
    async fn test_fake_transport_with_error() {
        let transport = FakeTransport::with_error("test error");
        let result = transport.post_json("http://test", &[], "{}").await;
        assert!(matches!(result, Err(AdapterError::Network(_))));
    }

    #[tokio::test]
    async fn test_fake_transport_with_status() {
        let transport = FakeTransport::with_status(503, "overloaded");
        let result = transport.post_json("http://test", &[], "{}").await;
        match result {
            Err(AdapterError::Http { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "overloaded");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fake_transport_records_calls() {
        let transport = FakeTransport::new("{}");
        let log = transport.call_log();

        transport
            .post_json("http://a", &[("key", "k1")], r#"{"n":1}"#)
            .await
            .unwrap();
        transport.post_json("http://b", &[], "{}").await.unwrap();

        assert_eq!(transport.call_count(), 2);
        let calls = log.lock().unwrap();
        assert_eq!(calls[0].url, "http://a");
        assert_eq!(calls[0].query, vec![("key".to_string(), "k1".to_string())]);
        assert_eq!(calls[0].json()["n"], 1);
        assert_eq!(calls[1].url, "http://b");
    }

    #[test]
    fn test_adapter_error_display() {
        let err = AdapterError::Network("test".to_string());
        assert_eq!(format!("{}", err), "Network error: test");

        let err = AdapterError::Http {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(format!("{}", err), "HTTP error 404: not found");

        let err = AdapterError::Timeout(250);
        assert!(format!("{}", err).contains("250 ms"));
    }
}
