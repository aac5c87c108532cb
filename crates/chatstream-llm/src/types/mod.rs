//! Canonical, provider-agnostic types
//!
//! Callers build conversations from [`Message`] values and read replies as
//! [`StreamChunk`] values, whichever vendor is active.

pub mod message;
pub mod stream;

pub use message::{Message, Role};
pub use stream::StreamChunk;
