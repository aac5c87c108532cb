//! Anthropic Messages API wire format types

use serde::{Deserialize, Serialize};

/// Anthropic API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

// -- Request types --

/// Anthropic Messages API request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages; system instructions are folded into the first user turn
    pub messages: Vec<AnthropicMessage>,
    /// Maximum tokens to generate (required by the API)
    pub max_tokens: i64,
    /// Sampling temperature
    pub temperature: f64,
    /// Whether to stream the response
    pub stream: bool,
}

/// Message in an Anthropic request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnthropicMessage {
    /// Role ("user" or "assistant")
    pub role: AnthropicRole,
    /// Text content
    pub content: String,
}

/// Roles accepted by the Messages API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnthropicRole {
    /// User turn
    User,
    /// Assistant turn
    Assistant,
}

// -- Streaming types --

/// Server-sent event in an Anthropic stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicStreamEvent {
    /// Stream started
    MessageStart {
        /// Initial message metadata
        message: AnthropicStreamMessage,
    },
    /// A content block started
    ContentBlockStart {
        /// Block index
        index: u32,
        /// Initial block content
        content_block: serde_json::Value,
    },
    /// Incremental content within a block
    ContentBlockDelta {
        /// Block index
        index: u32,
        /// Delta content
        delta: AnthropicStreamDelta,
    },
    /// Content block finished
    ContentBlockStop {
        /// Block index
        index: u32,
    },
    /// Message metadata delta (stop reason, usage)
    MessageDelta {
        /// Delta with stop reason
        delta: AnthropicMessageDelta,
        /// Updated usage
        #[serde(default)]
        usage: Option<AnthropicUsage>,
    },
    /// Stream completed
    MessageStop,
    /// Keep-alive
    Ping,
    /// Error reported mid-stream
    Error {
        /// Error details
        error: AnthropicErrorDetail,
    },
    /// Event type this client does not know about
    #[serde(other)]
    Unknown,
}

/// Partial message in a `message_start` event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnthropicStreamMessage {
    /// Response identifier
    #[serde(default)]
    pub id: String,
    /// Model
    #[serde(default)]
    pub model: String,
    /// Initial usage
    #[serde(default)]
    pub usage: Option<AnthropicUsage>,
}

/// Delta content in a `content_block_delta` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicStreamDelta {
    /// Incremental text
    TextDelta {
        /// Text fragment
        text: String,
    },
    /// Incremental tool input JSON
    InputJsonDelta {
        /// JSON fragment
        partial_json: String,
    },
    /// Delta kind this client does not know about (e.g. thinking)
    #[serde(other)]
    Unknown,
}

/// Delta in a `message_delta` event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnthropicMessageDelta {
    /// Stop reason
    #[serde(default)]
    pub stop_reason: Option<String>,
    /// Stop sequence
    #[serde(default)]
    pub stop_sequence: Option<String>,
}

/// Token usage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnthropicUsage {
    /// Input tokens
    #[serde(default)]
    pub input_tokens: u32,
    /// Output tokens
    #[serde(default)]
    pub output_tokens: u32,
}

// -- Error response --

/// Anthropic error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicErrorResponse {
    /// Error details
    pub error: AnthropicErrorDetail,
}

/// Anthropic error detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnthropicErrorDetail {
    /// Error type (e.g. `overloaded_error`)
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message
    pub message: String,
}

/// Extract the message from an Anthropic error body
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<AnthropicErrorResponse>(body)
        .ok()
        .map(|response| format!("{}: {}", response.error.error_type, response.error.message))
}
