//! Conversion between canonical types and provider wire shapes
//!
//! Each submodule holds the pure formatter (canonical history to request
//! messages) and normalizer (stream chunk to [`StreamChunk`]) for one provider.
//!
//! [`StreamChunk`]: crate::types::StreamChunk

pub mod anthropic;
pub mod gemini;
pub mod openai;

use chatstream_config::Provider;
use serde::Serialize;

use crate::error::LlmError;
use crate::protocol::anthropic::AnthropicMessage;
use crate::protocol::gemini::GeminiContent;
use crate::types::Message;

/// Conversation in the wire shape of one provider
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "provider", content = "messages", rename_all = "lowercase")]
pub enum FormattedRequest {
    /// Canonical messages, unchanged
    OpenAi(Vec<Message>),
    /// User/assistant messages with the system prompt folded in
    Anthropic(Vec<AnthropicMessage>),
    /// User/model contents without system messages
    Gemini(Vec<GeminiContent>),
}

impl FormattedRequest {
    /// Provider this request is shaped for
    pub const fn provider(&self) -> Provider {
        match self {
            Self::OpenAi(_) => Provider::OpenAi,
            Self::Anthropic(_) => Provider::Anthropic,
            Self::Gemini(_) => Provider::Gemini,
        }
    }

    /// Number of formatted messages
    pub fn len(&self) -> usize {
        match self {
            Self::OpenAi(messages) => messages.len(),
            Self::Anthropic(messages) => messages.len(),
            Self::Gemini(contents) => contents.len(),
        }
    }

    /// Whether no messages survived formatting
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Format a canonical history for `provider`
pub fn format_request(history: &[Message], provider: Provider) -> Result<FormattedRequest, LlmError> {
    match provider {
        Provider::OpenAi => Ok(FormattedRequest::OpenAi(openai::format_messages(history))),
        Provider::Anthropic => Ok(FormattedRequest::Anthropic(anthropic::format_messages(history))),
        Provider::Gemini => Ok(FormattedRequest::Gemini(gemini::format_messages(history))),
        other => Err(LlmError::UnsupportedProvider(other)),
    }
}
