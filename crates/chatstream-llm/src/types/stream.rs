use serde::{Deserialize, Serialize};

/// One normalized increment of a streamed reply
///
/// `content` is `None` (or empty) for chunks that carry no visible text,
/// such as role announcements or control events. Consumers skip those.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Incremental text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl StreamChunk {
    /// A chunk with no visible text
    pub const fn empty() -> Self {
        Self { content: None }
    }

    /// A chunk carrying text
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }

    /// Text to render, or `None` when the chunk should be skipped
    pub fn visible_text(&self) -> Option<&str> {
        self.content.as_deref().filter(|text| !text.is_empty())
    }

    /// Whether this chunk carries no visible text
    pub fn is_empty(&self) -> bool {
        self.visible_text().is_none()
    }
}

impl From<Option<String>> for StreamChunk {
    fn from(content: Option<String>) -> Self {
        Self { content }
    }
}
