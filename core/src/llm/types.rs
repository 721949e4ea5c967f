//! Gemini wire types and request-scoped values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gemini API credential
///
/// Debug output is redacted so the key never lands in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key; blank values are treated as absent
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Sampling options forwarded as `generationConfig`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerationOptions {
    /// `None` when neither option is set, so the field is omitted upstream
    pub fn from_parts(temperature: Option<f32>, max_output_tokens: Option<u32>) -> Option<Self> {
        if temperature.is_none() && max_output_tokens.is_none() {
            None
        } else {
            Some(Self {
                temperature,
                max_output_tokens,
            })
        }
    }
}

/// Everything needed for one outbound call, built fresh per request
#[derive(Debug, Clone, PartialEq)]
pub struct PromptEnvelope {
    /// Caller's query, forwarded verbatim
    pub user_message: String,
    /// Composed system instruction
    pub system_instruction: String,
    pub generation: Option<GenerationOptions>,
}

/// A single text part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// A content block (`role` is omitted on system instructions and replies)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// `generateContent` request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationOptions>,
}

impl From<&PromptEnvelope> for GenerateContentRequest {
    fn from(envelope: &PromptEnvelope) -> Self {
        Self {
            contents: vec![Content::text(Some("user"), envelope.user_message.clone())],
            system_instruction: Content::text(None, envelope.system_instruction.clone()),
            generation_config: envelope.generation,
        }
    }
}

/// Candidate in a `generateContent` reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

/// Reply shape returned to the caller on every 200
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Single-candidate reply carrying `text`
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Content::text(None, text),
            }],
        }
    }
}
