//! HTTP transport for the Gemini adapter
//!
//! Concrete enum over the real and fake transports, so adapters stay
//! monomorphic and tests can swap the network out.

use async_trait::async_trait;

pub use crate::llm::adapters::transport_fake::{CallLog, FakeReply, FakeTransport, RecordedCall};
pub use crate::llm::adapters::transport_reqwest::ReqwestTransport;
pub use crate::llm::adapters::transport_types::{AdapterError, HttpTransport};

/// Concrete transport enum
#[derive(Debug)]
pub enum Transport {
    Real(ReqwestTransport),
    Fake(FakeTransport),
}

#[async_trait]
impl HttpTransport for Transport {
    async fn post_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError> {
        match self {
            Transport::Real(t) => t.post_json(url, query, body).await,
            Transport::Fake(t) => t.post_json(url, query, body).await,
        }
    }
}

impl From<FakeTransport> for Transport {
    fn from(fake: FakeTransport) -> Self {
        Transport::Fake(fake)
    }
}

impl From<ReqwestTransport> for Transport {
    fn from(real: ReqwestTransport) -> Self {
        Transport::Real(real)
    }
}
