//! Provider trait and implementations for LLM backends

pub mod anthropic;
pub mod gemini;
pub mod openai;
mod sse;

use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use chatstream_config::Provider;
use futures_util::{Stream, StreamExt};

use crate::error::LlmError;
use crate::types::{Message, StreamChunk};

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

/// Stream of normalized chunks for one turn
pub type TurnStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, LlmError>> + Send>>;

/// Hook run when a vendor stream is released
type ReleaseHook = Box<dyn FnOnce() + Send>;

/// Vendor-native chunk stream with a release hook
///
/// The hook runs exactly once, when the stream is dropped: after the vendor
/// ends the stream, after an error, or when the consumer stops early.
pub struct ChunkStream<C> {
    inner: Pin<Box<dyn Stream<Item = Result<C, LlmError>> + Send>>,
    on_release: Option<ReleaseHook>,
}

impl<C> ChunkStream<C> {
    /// Wrap a raw chunk stream
    pub fn new(inner: impl Stream<Item = Result<C, LlmError>> + Send + 'static) -> Self {
        Self {
            inner: Box::pin(inner),
            on_release: None,
        }
    }

    /// Run `hook` when this stream is dropped
    #[must_use]
    pub fn on_release(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_release = Some(Box::new(hook));
        self
    }
}

impl<C> Stream for ChunkStream<C> {
    type Item = Result<C, LlmError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl<C> Drop for ChunkStream<C> {
    fn drop(&mut self) {
        if let Some(hook) = self.on_release.take() {
            hook();
        }
    }
}

/// One vendor's capability set: format, stream, normalize
///
/// Formatting and normalization are pure and depend only on the vendor;
/// streaming owns the vendor client.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Vendor this adapter talks to
    const PROVIDER: Provider;

    /// Provider-native request messages
    type Request: Send;

    /// Provider-native stream chunk
    type Chunk: Send + 'static;

    /// Translate a canonical history into request messages
    fn format(history: &[Message]) -> Self::Request;

    /// Issue the streaming call
    async fn stream_completion(&self, request: Self::Request) -> Result<ChunkStream<Self::Chunk>, LlmError>;

    /// Translate one vendor chunk into a normalized chunk
    fn normalize(chunk: &Self::Chunk) -> StreamChunk;
}

/// Object-safe view of a [`ChatProvider`] running whole turns
///
/// Implemented for every `ChatProvider`; the orchestrator holds one of these
/// so the active vendor can be chosen at runtime.
#[async_trait]
pub trait TurnRunner: Send + Sync {
    /// Vendor behind this runner
    fn provider(&self) -> Provider;

    /// Format `history`, start the vendor stream, and normalize its chunks
    async fn run_turn(&self, history: &[Message]) -> Result<TurnStream, LlmError>;
}

#[async_trait]
impl<P> TurnRunner for P
where
    P: ChatProvider + 'static,
{
    fn provider(&self) -> Provider {
        P::PROVIDER
    }

    async fn run_turn(&self, history: &[Message]) -> Result<TurnStream, LlmError> {
        let request = P::format(history);
        let raw = self.stream_completion(request).await?;

        Ok(Box::pin(raw.map(|item| item.map(|chunk| P::normalize(&chunk)))))
    }
}
