//! `OpenAI` chat completion API wire format types

use serde::{Deserialize, Serialize};

use crate::types::Message;

/// Sentinel data line that ends an `OpenAI` stream
pub const DONE_MARKER: &str = "[DONE]";

// -- Request types --

/// `OpenAI` chat completion request
///
/// Messages use the canonical shape unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<Message>,
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum tokens to generate
    pub max_tokens: i64,
    /// Whether to stream the response
    pub stream: bool,
}

// -- Streaming types --

/// `OpenAI` streaming chunk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAiStreamChunk {
    /// Chunk identifier
    #[serde(default)]
    pub id: String,
    /// Model used
    #[serde(default)]
    pub model: String,
    /// Delta choices; empty on usage-only chunks
    #[serde(default)]
    pub choices: Vec<OpenAiStreamChoice>,
}

/// Choice within a streaming chunk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAiStreamChoice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// Incremental delta
    #[serde(default)]
    pub delta: OpenAiStreamDelta,
    /// Finish reason (present on final chunk)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Delta content within a streaming choice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAiStreamDelta {
    /// Role (present on first chunk)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Incremental text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl OpenAiStreamChunk {
    /// A single-choice chunk carrying `content`, as the API sends them
    pub fn delta(content: Option<&str>) -> Self {
        Self {
            choices: vec![OpenAiStreamChoice {
                delta: OpenAiStreamDelta {
                    role: None,
                    content: content.map(str::to_owned),
                },
                ..OpenAiStreamChoice::default()
            }],
            ..Self::default()
        }
    }
}

// -- Error response --

/// `OpenAI` error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiErrorResponse {
    /// Error details
    pub error: OpenAiErrorDetail,
}

/// `OpenAI` error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiErrorDetail {
    /// Error message
    pub message: String,
    /// Error type
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
}

/// Extract the message from an `OpenAI` error body
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<OpenAiErrorResponse>(body)
        .ok()
        .map(|response| response.error.message)
}
