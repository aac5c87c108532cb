//! Formatting and normalization for the Gemini API

use crate::protocol::gemini::{GeminiContent, GeminiRole, GeminiStreamChunk};
use crate::types::{Message, Role, StreamChunk};

/// Convert a canonical history to Gemini contents
///
/// System messages are dropped. User turns stay `user`; every other role
/// becomes `model`.
pub fn format_messages(history: &[Message]) -> Vec<GeminiContent> {
    history
        .iter()
        .filter(|msg| msg.role != Role::System)
        .map(|msg| {
            let role = if msg.role == Role::User {
                GeminiRole::User
            } else {
                GeminiRole::Model
            };
            GeminiContent::text(role, msg.content.clone())
        })
        .collect()
}

/// The chunk's text
pub fn normalize_chunk(chunk: &GeminiStreamChunk) -> StreamChunk {
    chunk.text().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_system_and_maps_roles() {
        let history = [
            Message::system("S"),
            Message::user("U1"),
            Message::assistant("A1"),
            Message::new(Role::Tool, "T1"),
            Message::user("U2"),
        ];

        assert_eq!(
            format_messages(&history),
            vec![
                GeminiContent::text(GeminiRole::User, "U1"),
                GeminiContent::text(GeminiRole::Model, "A1"),
                GeminiContent::text(GeminiRole::Model, "T1"),
                GeminiContent::text(GeminiRole::User, "U2"),
            ]
        );
    }

    #[test]
    fn content_is_a_single_part() {
        let formatted = format_messages(&[Message::user("hello")]);
        assert_eq!(formatted[0].parts.len(), 1);
        assert_eq!(formatted[0].first_text(), Some("hello"));
    }

    #[test]
    fn wire_shape() {
        let formatted = format_messages(&[Message::system("S"), Message::assistant("A")]);
        assert_eq!(
            serde_json::to_value(&formatted).unwrap(),
            serde_json::json!([{"role": "model", "parts": [{"text": "A"}]}])
        );
    }

    #[test]
    fn empty_history() {
        assert!(format_messages(&[]).is_empty());
    }

    #[test]
    fn extracts_chunk_text() {
        let chunk: GeminiStreamChunk = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hel"},{"text":"lo"}]},"index":0}],
                "usageMetadata":{"promptTokenCount":2}}"#,
        )
        .unwrap();
        assert_eq!(normalize_chunk(&chunk), StreamChunk::text("Hello"));
    }

    #[test]
    fn chunk_without_text_has_no_content() {
        let chunk: GeminiStreamChunk =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"STOP"}]}"#).unwrap();
        assert_eq!(normalize_chunk(&chunk), StreamChunk::empty());
        assert_eq!(normalize_chunk(&GeminiStreamChunk::default()), StreamChunk::empty());
    }

    #[test]
    fn normalization_is_pure() {
        let chunk = GeminiStreamChunk::with_text("same");
        assert_eq!(normalize_chunk(&chunk), normalize_chunk(&chunk));
    }
}
