//! LLM integration: prompt contracts, wire types and the Gemini adapter

pub mod adapters;
pub mod contracts;
pub mod types;

pub use types::{ApiKey, GenerationOptions, PromptEnvelope};
