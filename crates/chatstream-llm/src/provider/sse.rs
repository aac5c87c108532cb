//! Server-sent event plumbing shared by the HTTP adapters

use chatstream_config::Provider;
use eventsource_stream::{Event, Eventsource};
use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use reqwest::RequestBuilder;

use super::ChunkStream;
use crate::error::{LlmError, ProviderFailure};

/// Outcome of decoding one SSE event
pub(crate) enum Decoded<C> {
    /// A vendor chunk to hand to the normalizer
    Chunk(C),
    /// Nothing to yield (blank data line)
    Skip,
    /// The vendor signalled the end of the stream
    Done,
}

/// Decodes one SSE event into a vendor chunk
pub(crate) type DecodeFn<C> = fn(&Event) -> Result<Decoded<C>, ProviderFailure>;

/// Extracts a readable message from a vendor error body
pub(crate) type ErrorMessageFn = fn(&str) -> Option<String>;

/// Send a streaming request and decode its SSE response into vendor chunks
///
/// Non-success statuses fail before any chunk is produced. The stream ends
/// at the vendor's completion signal, when the connection closes, or right
/// after the first error it yields. Dropping the returned stream drops the
/// HTTP response and releases the connection.
pub(crate) async fn stream_events<C>(
    provider: Provider,
    request: RequestBuilder,
    error_message: ErrorMessageFn,
    decode: DecodeFn<C>,
) -> Result<ChunkStream<C>, LlmError>
where
    C: Send + 'static,
{
    let response = request.send().await.map_err(|e| {
        tracing::error!(provider = %provider, error = %e, "upstream stream request failed");
        LlmError::provider(provider, e)
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_else(|e| {
            tracing::debug!(provider = %provider, error = %e, "failed to read error body");
            String::new()
        });
        tracing::warn!(provider = %provider, status = %status, "upstream returned error");
        let message = error_message(&body).unwrap_or(body);
        return Err(LlmError::provider(provider, ProviderFailure::Status { status, message }));
    }

    let events = response.bytes_stream().eventsource().map(move |result| match result {
        Ok(event) => decode(&event).map_err(|failure| LlmError::provider(provider, failure)),
        Err(e) => Err(LlmError::provider(provider, ProviderFailure::Stream(Box::new(e)))),
    });

    Ok(ChunkStream::new(end_at_first_error(Box::pin(events))).on_release(move || {
        tracing::debug!(provider = %provider, "released upstream stream");
    }))
}

/// Yield decoded chunks until the vendor is done or the first error
///
/// The source is dropped as soon as an error is yielded, so a vendor that
/// keeps the connection open after a bad event cannot stall the caller.
fn end_at_first_error<C, S>(events: S) -> impl Stream<Item = Result<C, LlmError>> + Send + 'static
where
    C: Send + 'static,
    S: Stream<Item = Result<Decoded<C>, LlmError>> + Send + Unpin + 'static,
{
    stream::unfold(Some(events), |state| async move {
        let mut events = state?;
        loop {
            match events.next().await? {
                Ok(Decoded::Chunk(chunk)) => return Some((Ok(chunk), Some(events))),
                Ok(Decoded::Skip) => {}
                Ok(Decoded::Done) => return None,
                Err(e) => return Some((Err(e), None)),
            }
        }
    })
}

/// Failure for an error object sent in place of a chunk
///
/// `kind_key` names the field holding the vendor's error type.
pub(crate) fn vendor_error(error: &serde_json::Value, kind_key: &str) -> ProviderFailure {
    let kind = error
        .get(kind_key)
        .and_then(serde_json::Value::as_str)
        .filter(|kind| !kind.is_empty())
        .unwrap_or("error");
    let message = error
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map_or_else(|| error.to_string(), str::to_owned);

    ProviderFailure::Vendor {
        kind: kind.to_owned(),
        message,
    }
}
