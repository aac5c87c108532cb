//! `OpenAI` chat completions provider implementation

use std::sync::Arc;

use async_trait::async_trait;
use chatstream_config::{ModelRunConfig, Provider, ProviderCredentials};
use eventsource_stream::Event;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::sse::{self, Decoded};
use super::{ChatProvider, ChunkStream};
use crate::convert::openai::{format_messages, normalize_chunk};
use crate::error::{LlmError, ProviderFailure};
use crate::protocol::openai::{self as protocol, DONE_MARKER, OpenAiRequest, OpenAiStreamChunk};
use crate::types::{Message, StreamChunk};

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Header carrying the `OpenAI` organization id
const ORGANIZATION_HEADER: &str = "OpenAI-Organization";

/// `OpenAI` chat completions provider
pub struct OpenAiProvider {
    client: Client,
    base_url: Url,
    model: Arc<ModelRunConfig>,
    api_key: Option<SecretString>,
    organization: Option<String>,
}

impl OpenAiProvider {
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
            organization: credentials.openai_organization.clone(),
        }
    }

    /// Build the chat completions URL
    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    const PROVIDER: Provider = Provider::OpenAi;

    type Request = Vec<Message>;
    type Chunk = OpenAiStreamChunk;

    fn format(history: &[Message]) -> Self::Request {
        format_messages(history)
    }

    async fn stream_completion(&self, request: Self::Request) -> Result<ChunkStream<Self::Chunk>, LlmError> {
        let body = OpenAiRequest {
            model: self.model.model.clone(),
            messages: request,
            temperature: self.model.temperature,
            max_tokens: self.model.max_tokens,
            stream: true,
        };

        tracing::debug!(messages = body.messages.len(), "sending chat completion request");

        let mut builder = self.client.post(self.completions_url()).json(&body);

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }
        if let Some(organization) = &self.organization {
            builder = builder.header(ORGANIZATION_HEADER, organization);
        }

        sse::stream_events(Self::PROVIDER, builder, protocol::error_message, decode_event).await
    }

    fn normalize(chunk: &Self::Chunk) -> StreamChunk {
        normalize_chunk(chunk)
    }
}

/// Decode one SSE event; `[DONE]` ends the stream
///
/// An `error` object sent in place of a chunk becomes a vendor failure.
fn decode_event(event: &Event) -> Result<Decoded<OpenAiStreamChunk>, ProviderFailure> {
    let data = event.data.trim();

    if data.is_empty() {
        return Ok(Decoded::Skip);
    }
    if data == DONE_MARKER {
        return Ok(Decoded::Done);
    }

    let value: serde_json::Value = serde_json::from_str(data)?;
    if let Some(error) = value.get("error") {
        return Err(sse::vendor_error(error, "type"));
    }

    Ok(Decoded::Chunk(serde_json::from_value(value)?))
}
