//! Chat proxy handler
//!
//! Validates a request, grounds it in the selected product's knowledge base,
//! calls Gemini once and normalises whatever comes back.
//!
//! Only request and configuration problems are errors. Every upstream
//! failure, including timeouts and empty or blocked replies, becomes a
//! success-shaped fallback so the caller can always render
//! `candidates[0].content.parts[0].text`.

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::knowledge::KnowledgeBase;
use crate::llm::adapters::gemini::{block_reason, extract_text, GeminiAdapter};
use crate::llm::adapters::transport::{ReqwestTransport, Transport};
use crate::llm::adapters::AdapterError;
use crate::llm::contracts::{build_envelope, EMPTY_OR_BLOCKED_TEXT, UPSTREAM_UNAVAILABLE_TEXT};
use crate::llm::types::{ApiKey, GenerateContentResponse, GenerationOptions};
use http::Method;
use serde::Deserialize;
use tracing::{debug, error, info, warn, Instrument};
use uuid::Uuid;

/// JSON body accepted from callers
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatRequestBody {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

impl ChatRequestBody {
    /// Parse leniently: anything that is not a JSON object with string
    /// fields reads as an empty body
    pub fn from_slice(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    /// The query, when present and non-empty
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }
}

/// One inbound request
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    pub method: Method,
    pub body: ChatRequestBody,
}

impl IncomingRequest {
    pub fn new(method: Method, body: ChatRequestBody) -> Self {
        Self { method, body }
    }

    /// Build from a method and raw body bytes
    pub fn from_parts(method: Method, body: &[u8]) -> Self {
        Self::new(method, ChatRequestBody::from_slice(body))
    }

    /// POST with the given query and context
    pub fn post(query: impl Into<String>, context: Option<&str>) -> Self {
        Self::new(
            Method::POST,
            ChatRequestBody {
                query: Some(query.into()),
                context: context.map(str::to_string),
            },
        )
    }
}

/// Why a fallback reply was substituted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Transport failure, timeout, non-2xx or undecodable body
    UpstreamUnavailable,
    /// 2xx without usable text (empty, missing or safety-blocked)
    EmptyOrBlocked,
}

impl FallbackReason {
    pub fn message(&self) -> &'static str {
        match self {
            FallbackReason::UpstreamUnavailable => UPSTREAM_UNAVAILABLE_TEXT,
            FallbackReason::EmptyOrBlocked => EMPTY_OR_BLOCKED_TEXT,
        }
    }
}

/// Reply for a successful (200) outcome
///
/// Always carries non-empty `candidates[0].content.parts[0].text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedResponse {
    /// Provider body, unmodified
    PassThrough { body: String, text: String },
    /// Synthetic apologetic payload
    Fallback(FallbackReason),
}

impl NormalizedResponse {
    /// Text the caller will render
    pub fn text(&self) -> &str {
        match self {
            NormalizedResponse::PassThrough { text, .. } => text,
            NormalizedResponse::Fallback(reason) => reason.message(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, NormalizedResponse::Fallback(_))
    }

    /// JSON body to send with the 200
    pub fn into_body(self) -> String {
        match self {
            NormalizedResponse::PassThrough { body, .. } => body,
            NormalizedResponse::Fallback(reason) => {
                serde_json::to_string(&GenerateContentResponse::from_text(reason.message()))
                    .unwrap_or_default()
            }
        }
    }
}

/// The single request/response transform
///
/// Holds only immutable state, so one instance can be shared across
/// concurrent requests behind an `Arc`.
#[derive(Debug)]
pub struct ChatProxyHandler {
    api_key: Option<ApiKey>,
    knowledge: KnowledgeBase,
    generation: Option<GenerationOptions>,
    adapter: GeminiAdapter,
}

impl ChatProxyHandler {
    pub fn new(
        api_key: Option<ApiKey>,
        knowledge: KnowledgeBase,
        generation: Option<GenerationOptions>,
        adapter: GeminiAdapter,
    ) -> Self {
        Self {
            api_key,
            knowledge,
            generation,
            adapter,
        }
    }

    /// Build from loaded configuration with the real HTTP transport
    pub fn from_config(config: &ProxyConfig) -> Self {
        let transport = Transport::Real(ReqwestTransport::with_timeout(config.gemini.timeout()));
        Self::from_config_with_transport(config, transport)
    }

    /// Build from configuration over a caller-supplied transport (for testing)
    pub fn from_config_with_transport(config: &ProxyConfig, transport: Transport) -> Self {
        let adapter = GeminiAdapter::with_transport(
            config.gemini.base_url.clone(),
            config.gemini.model.clone(),
            transport,
        );
        Self::new(
            config.api_key.clone(),
            KnowledgeBase::default(),
            config.gemini.generation(),
            adapter,
        )
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Handle one request
    pub async fn handle(&self, request: IncomingRequest) -> Result<NormalizedResponse, ProxyError> {
        let span = tracing::info_span!("chat", request_id = %Uuid::new_v4());
        self.handle_inner(request).instrument(span).await
    }

    async fn handle_inner(
        &self,
        request: IncomingRequest,
    ) -> Result<NormalizedResponse, ProxyError> {
        if request.method != Method::POST {
            debug!(method = %request.method, "Rejecting non-POST request");
            return Err(ProxyError::MethodNotAllowed);
        }

        let query = request.body.query().ok_or_else(|| {
            debug!("Rejecting request without query");
            ProxyError::MissingQuery
        })?;

        let api_key = self.api_key.as_ref().ok_or_else(|| {
            error!("Gemini API key is not configured");
            ProxyError::MissingApiKey
        })?;

        let (context, entry) = self.knowledge.lookup(request.body.context.as_deref());
        let envelope = build_envelope(query, entry, self.generation);
        debug!(
            context = context.as_str(),
            query_len = query.len(),
            "Forwarding query to Gemini"
        );

        let response = match self.adapter.generate_content(api_key, &envelope).await {
            Ok(body) => normalize(body),
            Err(err) => {
                log_upstream_error(&err);
                NormalizedResponse::Fallback(FallbackReason::UpstreamUnavailable)
            }
        };

        info!(
            context = context.as_str(),
            fallback = response.is_fallback(),
            "Chat request completed"
        );
        Ok(response)
    }
}

/// Classify a 2xx provider body
pub fn normalize(body: String) -> NormalizedResponse {
    match extract_text(&body) {
        Ok(Some(text)) => NormalizedResponse::PassThrough { body, text },
        Ok(None) => {
            warn!(
                block_reason = block_reason(&body).as_deref().unwrap_or("none"),
                payload = %body,
                "Gemini returned an empty or blocked response"
            );
            NormalizedResponse::Fallback(FallbackReason::EmptyOrBlocked)
        }
        Err(err) => {
            error!(error = %err, payload = %body, "Gemini returned an undecodable body");
            NormalizedResponse::Fallback(FallbackReason::UpstreamUnavailable)
        }
    }
}

fn log_upstream_error(err: &AdapterError) {
    match err {
        AdapterError::Http { status, message } => {
            error!(status = *status, details = %message, "Gemini API error");
        }
        other => {
            error!(error = %other, "Gemini request failed");
        }
    }
}
