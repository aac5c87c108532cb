//! Formatting and normalization for the Anthropic Messages API

use crate::protocol::anthropic::{AnthropicMessage, AnthropicRole, AnthropicStreamDelta, AnthropicStreamEvent};
use crate::types::{Message, Role, StreamChunk};

/// Convert a canonical history to Anthropic messages
///
/// System messages are dropped. The first system message's content is
/// folded into the first remaining message as `"{system}\n\nUser: {content}"`
/// when that message is a user turn. Every role other than user becomes
/// assistant.
pub fn format_messages(history: &[Message]) -> Vec<AnthropicMessage> {
    let system = history
        .iter()
        .find(|msg| msg.role == Role::System)
        .map(|msg| msg.content.as_str())
        .filter(|content| !content.is_empty());

    let mut conversation = Vec::with_capacity(history.len());

    for msg in history.iter().filter(|msg| msg.role != Role::System) {
        let content = match system {
            Some(system) if msg.role == Role::User && conversation.is_empty() => {
                format!("{system}\n\nUser: {}", msg.content)
            }
            _ => msg.content.clone(),
        };

        let role = if msg.role == Role::User {
            AnthropicRole::User
        } else {
            AnthropicRole::Assistant
        };

        conversation.push(AnthropicMessage { role, content });
    }

    conversation
}

/// Text of a `content_block_delta` event; every other event carries none
pub fn normalize_event(event: &AnthropicStreamEvent) -> StreamChunk {
    match event {
        AnthropicStreamEvent::ContentBlockDelta {
            delta: AnthropicStreamDelta::TextDelta { text },
            ..
        } => StreamChunk::text(text.clone()),
        _ => StreamChunk::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anthropic(role: AnthropicRole, content: &str) -> AnthropicMessage {
        AnthropicMessage {
            role,
            content: content.to_owned(),
        }
    }

    #[test]
    fn system_is_folded_into_first_user_turn() {
        let history = [Message::system("S"), Message::user("U")];
        assert_eq!(
            format_messages(&history),
            vec![anthropic(AnthropicRole::User, "S\n\nUser: U")]
        );
    }

    #[test]
    fn only_first_user_turn_gets_the_prefix() {
        let history = [
            Message::system("Be terse"),
            Message::user("Hi"),
            Message::assistant("Hello"),
            Message::user("Bye"),
        ];
        assert_eq!(
            format_messages(&history),
            vec![
                anthropic(AnthropicRole::User, "Be terse\n\nUser: Hi"),
                anthropic(AnthropicRole::Assistant, "Hello"),
                anthropic(AnthropicRole::User, "Bye"),
            ]
        );
    }

    #[test]
    fn no_system_leaves_content_unchanged() {
        let history = [Message::user("a"), Message::assistant("b"), Message::new(Role::Tool, "c")];
        assert_eq!(
            format_messages(&history),
            vec![
                anthropic(AnthropicRole::User, "a"),
                anthropic(AnthropicRole::Assistant, "b"),
                anthropic(AnthropicRole::Assistant, "c"),
            ]
        );
    }

    #[test]
    fn system_is_not_folded_into_leading_assistant_turn() {
        let history = [Message::system("S"), Message::assistant("Welcome"), Message::user("U")];
        assert_eq!(
            format_messages(&history),
            vec![
                anthropic(AnthropicRole::Assistant, "Welcome"),
                anthropic(AnthropicRole::User, "U"),
            ]
        );
    }

    #[test]
    fn only_first_system_message_is_used() {
        let history = [Message::system("first"), Message::system("second"), Message::user("U")];
        assert_eq!(
            format_messages(&history),
            vec![anthropic(AnthropicRole::User, "first\n\nUser: U")]
        );
    }

    #[test]
    fn empty_system_is_not_folded() {
        let history = [Message::system(""), Message::user("U")];
        assert_eq!(format_messages(&history), vec![anthropic(AnthropicRole::User, "U")]);
    }

    #[test]
    fn empty_history() {
        assert!(format_messages(&[]).is_empty());
        assert!(format_messages(&[Message::system("only")]).is_empty());
    }

    #[test]
    fn text_delta_carries_text() {
        let event: AnthropicStreamEvent = serde_json::from_str(
            r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hi there"}}"#,
        )
        .unwrap();
        assert_eq!(normalize_event(&event), StreamChunk::text("Hi there"));
    }

    #[test]
    fn other_events_carry_nothing() {
        let events = [
            r#"{"type":"message_start","message":{"id":"m1","type":"message","role":"assistant","model":"claude-3","usage":{"input_tokens":3,"output_tokens":0}}}"#,
            r#"{"type":"content_block_start","index":0,"content_block":{"type":"text","text":""}}"#,
            r#"{"type":"ping"}"#,
            r#"{"type":"content_block_delta","index":0,"delta":{"type":"input_json_delta","partial_json":"{"}}"#,
            r#"{"type":"content_block_stop","index":0}"#,
            r#"{"type":"message_delta","delta":{"stop_reason":"end_turn"},"usage":{"output_tokens":5}}"#,
            r#"{"type":"message_stop"}"#,
            r#"{"type":"brand_new_event","payload":1}"#,
        ];

        for raw in events {
            let event: AnthropicStreamEvent = serde_json::from_str(raw).unwrap();
            assert!(normalize_event(&event).content.is_none(), "{raw}");
        }
    }

    #[test]
    fn normalization_is_pure() {
        let event = AnthropicStreamEvent::ContentBlockDelta {
            index: 0,
            delta: AnthropicStreamDelta::TextDelta { text: "x".to_owned() },
        };
        assert_eq!(normalize_event(&event), normalize_event(&event));
    }
}
