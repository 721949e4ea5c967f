//! Gemini response parsing
//!
//! Only `candidates[0].content.parts[0].text` matters for the reply; the
//! block/finish reasons are read for diagnostics.

use crate::llm::adapters::AdapterError;
use serde_json::Value as JsonValue;

/// Extract the first candidate's first text part
///
/// `Ok(None)` when the body is valid JSON but the text is missing, not a
/// string, or empty. `Err` only when the body is not JSON at all.
pub fn extract_text(response: &str) -> Result<Option<String>, AdapterError> {
    let json: JsonValue = serde_json::from_str(response)?;
    Ok(first_text(&json))
}

fn first_text(json: &JsonValue) -> Option<String> {
    json.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Why the provider produced no text, if it said so
///
/// Looks at `promptFeedback.blockReason` first, then
/// `candidates[0].finishReason`.
pub fn block_reason(response: &str) -> Option<String> {
    let json: JsonValue = serde_json::from_str(response).ok()?;

    json.get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(|r| r.as_str())
        .or_else(|| {
            json.get("candidates")
                .and_then(|c| c.get(0))
                .and_then(|c| c.get("finishReason"))
                .and_then(|r| r.as_str())
        })
        .map(str::to_string)
}
