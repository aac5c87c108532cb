//! Unified streaming chat layer for chatstream
//!
//! Translates one canonical conversation format into the wire shape of the
//! configured vendor (`OpenAI`, Anthropic, Gemini), streams the reply, and
//! normalizes every vendor chunk back into a single [`StreamChunk`] shape.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod convert;
pub mod error;
pub mod orchestrator;
pub mod protocol;
pub mod provider;
pub mod types;

pub use chatstream_config::{ModelRunConfig, Provider};
pub use convert::{FormattedRequest, format_request};
pub use error::{LlmError, ProviderFailure};
pub use orchestrator::{StreamOrchestrator, collect_text};
pub use provider::{ChatProvider, ChunkStream, TurnRunner, TurnStream};
pub use types::{Message, Role, StreamChunk};
