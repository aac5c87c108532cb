//! Per-turn streaming over the configured provider

use std::sync::Arc;

use chatstream_config::{Config, Provider};
use futures_util::StreamExt;
use tracing::Instrument;

use crate::error::LlmError;
use crate::provider::{AnthropicProvider, GeminiProvider, OpenAiProvider, TurnRunner, TurnStream};
use crate::types::Message;

/// Runs chat turns against one provider
///
/// Cheap to clone; clones share the same adapter and HTTP client.
#[derive(Clone)]
pub struct StreamOrchestrator {
    runner: Arc<dyn TurnRunner>,
}

impl StreamOrchestrator {
    /// Build around an already-constructed adapter
    pub const fn new(runner: Arc<dyn TurnRunner>) -> Self {
        Self { runner }
    }

    /// Build the adapter selected by the configured model
    ///
    /// The provider tag is matched here once; turns never re-dispatch.
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let model = Arc::new(config.model.clone());
        let provider = model.provider;
        let base_url = config.endpoints.base_url(provider).cloned();
        let overridden = base_url.is_some();

        let runner: Arc<dyn TurnRunner> = match provider {
            Provider::OpenAi => Arc::new(OpenAiProvider::new(model, &config.credentials, base_url)),
            Provider::Anthropic => Arc::new(AnthropicProvider::new(model, &config.credentials, base_url)),
            Provider::Gemini => Arc::new(GeminiProvider::new(model, &config.credentials, base_url)),
            other => return Err(LlmError::UnsupportedProvider(other)),
        };

        tracing::info!(
            provider = %provider,
            model = %config.model.model,
            base_url_override = overridden,
            "stream orchestrator ready"
        );

        Ok(Self::new(runner))
    }

    /// Provider every turn is sent to
    pub fn provider(&self) -> Provider {
        self.runner.provider()
    }

    /// Stream the assistant reply to `history`
    ///
    /// The returned stream is lazy and yields normalized chunks in vendor
    /// order. Dropping it cancels the turn and releases the connection.
    /// `history` is only read.
    pub async fn run_turn(&self, history: &[Message]) -> Result<TurnStream, LlmError> {
        let span = tracing::info_span!("turn", provider = %self.provider(), messages = history.len());

        self.runner.run_turn(history).instrument(span).await
    }
}

/// Drain a turn, concatenating its visible text
///
/// Stops at the first error.
pub async fn collect_text(mut chunks: TurnStream) -> Result<String, LlmError> {
    let mut reply = String::new();

    while let Some(chunk) = chunks.next().await {
        if let Some(text) = chunk?.visible_text() {
            reply.push_str(text);
        }
    }

    Ok(reply)
}
