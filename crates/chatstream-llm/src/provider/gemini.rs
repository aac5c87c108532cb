//! Gemini (Google Generative Language API) provider implementation

use std::sync::Arc;

use async_trait::async_trait;
use chatstream_config::{ModelRunConfig, Provider, ProviderCredentials};
use eventsource_stream::Event;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::sse::{self, Decoded};
use super::{ChatProvider, ChunkStream};
use crate::convert::gemini::{format_messages, normalize_chunk};
use crate::error::{LlmError, ProviderFailure};
use crate::protocol::gemini::{
    self as protocol, GeminiContent, GeminiGenerationConfig, GeminiRequest, GeminiRole, GeminiStreamChunk,
};
use crate::types::{Message, StreamChunk};

/// Default Gemini API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini provider
pub struct GeminiProvider {
    client: Client,
    base_url: Url,
    model: Arc<ModelRunConfig>,
    api_key: Option<SecretString>,
}

impl GeminiProvider {
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

    /// Build the `streamGenerateContent` endpoint URL for the configured model
    fn stream_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/models/{}:streamGenerateContent?alt=sse", self.model.model)
    }

    fn generation_config(&self) -> GeminiGenerationConfig {
        GeminiGenerationConfig {
            temperature: self.model.temperature,
            max_output_tokens: self.model.max_tokens,
        }
    }
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    const PROVIDER: Provider = Provider::Gemini;

    type Request = Vec<GeminiContent>;
    type Chunk = GeminiStreamChunk;

    fn format(history: &[Message]) -> Self::Request {
        format_messages(history)
    }

    async fn stream_completion(&self, request: Self::Request) -> Result<ChunkStream<Self::Chunk>, LlmError> {
        let body = ChatSession::start(request)?.send_message(self.generation_config());

        tracing::debug!(contents = body.contents.len(), "sending stream generate request");

        let mut builder = self.client.post(self.stream_url()).json(&body);

        if let Some(key) = &self.api_key {
            builder = builder.header("x-goog-api-key", key.expose_secret());
        }

        sse::stream_events(Self::PROVIDER, builder, protocol::error_message, decode_event).await
    }

    fn normalize(chunk: &Self::Chunk) -> StreamChunk {
        normalize_chunk(chunk)
    }
}

/// A chat seeded with prior turns plus the live message to send
#[derive(Debug)]
struct ChatSession {
    history: Vec<GeminiContent>,
    message: String,
}

impl ChatSession {
    /// Split formatted contents into seeded history and the live turn
    ///
    /// The last content is the live turn; its first text part is sent as a
    /// user message.
    fn start(mut contents: Vec<GeminiContent>) -> Result<Self, LlmError> {
        let last = contents
            .pop()
            .ok_or_else(|| LlmError::Format("no message to send to gemini".to_owned()))?;

        let message = last
            .first_text()
            .ok_or_else(|| LlmError::Format("last gemini message has no text part".to_owned()))?
            .to_owned();

        Ok(Self {
            history: contents,
            message,
        })
    }

    /// Request body sending the live turn on top of the seeded history
    fn send_message(self, generation_config: GeminiGenerationConfig) -> GeminiRequest {
        let mut contents = self.history;
        contents.push(GeminiContent::text(GeminiRole::User, self.message));

        GeminiRequest {
            contents,
            generation_config,
        }
    }
}

/// Decode one SSE event; the stream ends when the connection closes
///
/// An `error` object sent in place of a chunk becomes a vendor failure.
fn decode_event(event: &Event) -> Result<Decoded<GeminiStreamChunk>, ProviderFailure> {
    let data = event.data.trim();

    if data.is_empty() {
        return Ok(Decoded::Skip);
    }

    let value: serde_json::Value = serde_json::from_str(data)?;
    if let Some(error) = value.get("error") {
        return Err(sse::vendor_error(error, "status"));
    }

    Ok(Decoded::Chunk(serde_json::from_value(value)?))
}
