//! Gemini (Google Generative Language API) wire format types

use serde::{Deserialize, Serialize};

// -- Request types --

/// Gemini `streamGenerateContent` request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation contents, ending with the live user turn
    pub contents: Vec<GeminiContent>,
    /// Generation configuration
    pub generation_config: GeminiGenerationConfig,
}

/// Gemini content object containing role and parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Author role; absent on some response chunks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<GeminiRole>,
    /// Content parts
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

impl GeminiContent {
    /// Single-part text content for `role`
    pub fn text(role: GeminiRole, text: impl Into<String>) -> Self {
        Self {
            role: Some(role),
            parts: vec![GeminiPart::text(text)],
        }
    }

    /// Text of the first part, if it is a text part
    pub fn first_text(&self) -> Option<&str> {
        self.parts.first().and_then(|part| part.text.as_deref())
    }
}

/// Roles accepted by the Gemini API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeminiRole {
    /// User turn
    User,
    /// Model turn
    Model,
}

/// Individual part within a content object
///
/// Only text parts are produced or read; other part kinds deserialize
/// with `text` unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl GeminiPart {
    /// Text part
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()) }
    }
}

/// Generation configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum output tokens
    pub max_output_tokens: i64,
}

// -- Streaming types --

/// Gemini streaming chunk, one `generateContent` response per SSE event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiStreamChunk {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// Generated candidate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// Generated content
    #[serde(default)]
    pub content: Option<GeminiContent>,
    /// Finish reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl GeminiStreamChunk {
    /// A single-candidate chunk carrying `text`, as the API sends them
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![GeminiCandidate {
                content: Some(GeminiContent::text(GeminiRole::Model, text)),
                finish_reason: None,
            }],
        }
    }

    /// Text of the first candidate, joining its text parts
    ///
    /// `None` when the chunk has no candidate or no text parts.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let mut texts = content.parts.iter().filter_map(|part| part.text.as_deref()).peekable();
        texts.peek()?;
        Some(texts.collect())
    }
}

// -- Error response --

/// Gemini error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiErrorResponse {
    /// Error details
    pub error: GeminiErrorDetail,
}

/// Gemini error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiErrorDetail {
    /// HTTP status code
    #[serde(default)]
    pub code: u32,
    /// Error message
    pub message: String,
    /// Error status string
    #[serde(default)]
    pub status: String,
}

/// Extract the message from a Gemini error body
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<GeminiErrorResponse>(body)
        .ok()
        .map(|response| response.error.message)
}
