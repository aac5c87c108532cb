//! Anthropic Messages API provider implementation

use std::sync::Arc;

use async_trait::async_trait;
use chatstream_config::{ModelRunConfig, Provider, ProviderCredentials};
use eventsource_stream::Event;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::sse::{self, Decoded};
use super::{ChatProvider, ChunkStream};
use crate::convert::anthropic::{format_messages, normalize_event};
use crate::error::{LlmError, ProviderFailure};
use crate::protocol::anthropic::{
    self as protocol, ANTHROPIC_VERSION, AnthropicMessage, AnthropicRequest, AnthropicStreamEvent,
};
use crate::types::{Message, StreamChunk};

/// Default Anthropic API base URL
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Anthropic Messages API provider
pub struct AnthropicProvider {
    client: Client,
    base_url: Url,
    model: Arc<ModelRunConfig>,
    api_key: Option<SecretString>,
}

impl AnthropicProvider {
    /// Create from the shared model config and credentials
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded default base URL is invalid (should never happen).
    pub fn new(model: Arc<ModelRunConfig>, credentials: &ProviderCredentials, base_url: Option<Url>) -> Self {
        let base_url = base_url.unwrap_or_else(|| Url::parse(DEFAULT_BASE_URL).expect("valid default URL"));

        let api_key = credentials.api_key(Self::PROVIDER).cloned();
        if api_key.is_none() {
            tracing::warn!(provider = %Self::PROVIDER, "no API key configured; requests will be unauthenticated");
        }

        Self {
            client: Client::new(),
            base_url,
            model,
            api_key,
        }
    }

    /// Build the messages endpoint URL
    fn messages_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/messages")
    }
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    const PROVIDER: Provider = Provider::Anthropic;

    type Request = Vec<AnthropicMessage>;
    type Chunk = AnthropicStreamEvent;

    fn format(history: &[Message]) -> Self::Request {
        format_messages(history)
    }

    async fn stream_completion(&self, request: Self::Request) -> Result<ChunkStream<Self::Chunk>, LlmError> {
        let body = AnthropicRequest {
            model: self.model.model.clone(),
            messages: request,
            max_tokens: self.model.max_tokens,
            temperature: self.model.temperature,
            stream: true,
        };

        tracing::debug!(messages = body.messages.len(), "sending messages request");

        let mut builder = self
            .client
            .post(self.messages_url())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        if let Some(key) = &self.api_key {
            builder = builder.header("x-api-key", key.expose_secret());
        }

        sse::stream_events(Self::PROVIDER, builder, protocol::error_message, decode_event).await
    }

    fn normalize(chunk: &Self::Chunk) -> StreamChunk {
        normalize_event(chunk)
    }
}

/// Decode one SSE event; `error` events become failures
fn decode_event(event: &Event) -> Result<Decoded<AnthropicStreamEvent>, ProviderFailure> {
    let data = event.data.trim();

    if data.is_empty() {
        return Ok(Decoded::Skip);
    }

    let event: AnthropicStreamEvent = serde_json::from_str(data)?;

    match event {
        AnthropicStreamEvent::Error { error } => Err(ProviderFailure::Vendor {
            kind: error.error_type,
            message: error.message,
        }),
        other => Ok(Decoded::Chunk(other)),
    }
}
