//! Formatting and normalization for the `OpenAI` chat completions API

use crate::protocol::openai::OpenAiStreamChunk;
use crate::types::{Message, StreamChunk};

/// `OpenAI` accepts the canonical message shape unchanged
pub fn format_messages(history: &[Message]) -> Vec<Message> {
    history.to_vec()
}

/// Text delta of the first choice, passed through as-is
pub fn normalize_chunk(chunk: &OpenAiStreamChunk) -> StreamChunk {
    chunk
        .choices
        .first()
        .and_then(|choice| choice.delta.content.clone())
        .into()
}
