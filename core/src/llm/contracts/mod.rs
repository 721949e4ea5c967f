//! Prompt contracts: system instruction, fallback texts, envelope assembly

mod prompts;

pub use prompts::{system_instruction, EMPTY_OR_BLOCKED_TEXT, UPSTREAM_UNAVAILABLE_TEXT};

use crate::knowledge::KnowledgeEntry;
use crate::llm::types::{GenerationOptions, PromptEnvelope};

/// Assemble the outbound envelope for one request
///
/// The query is passed through untouched; only the system instruction is
/// templated.
pub fn build_envelope(
    query: &str,
    entry: &KnowledgeEntry,
    generation: Option<GenerationOptions>,
) -> PromptEnvelope {
    PromptEnvelope {
        user_message: query.to_string(),
        system_instruction: system_instruction(entry),
        generation,
    }
}
