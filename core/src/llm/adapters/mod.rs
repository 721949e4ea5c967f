//! LLM adapters
//!
//! Gemini adapter plus the transport seam it runs on.

pub mod gemini;
pub mod gemini_parse;
pub mod transport;
pub mod transport_fake;
pub mod transport_reqwest;
pub mod transport_types;

// Re-export common types
pub use gemini::GeminiAdapter;
pub use transport::{AdapterError, HttpTransport, Transport};
