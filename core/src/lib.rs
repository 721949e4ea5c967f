//! Supportdesk Core
//!
//! Context-grounded support chat over the Gemini API: request validation,
//! product knowledge lookup, prompt contract, the Gemini adapter and the
//! normalisation policy that turns every upstream failure into a friendly
//! reply.

pub mod config;
pub mod error;
pub mod handler;
pub mod knowledge;
pub mod llm;

pub use config::{GeminiSettings, ProxyConfig, ServerSettings};
pub use error::{ConfigError, ProxyError};
pub use handler::{
    ChatProxyHandler, ChatRequestBody, FallbackReason, IncomingRequest, NormalizedResponse,
};
pub use knowledge::{KnowledgeBase, KnowledgeEntry, ProductContext};
pub use llm::{ApiKey, GenerationOptions, PromptEnvelope};
