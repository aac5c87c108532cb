//! Mock vendor server for integration tests
//!
//! Accepts any POST, records it, and answers with a canned server-sent event
//! body or a canned error.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use futures_util::stream;
use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;

/// A request the mock received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl RecordedRequest {
    /// Header value as a string, if present
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

#[derive(Clone)]
enum Reply {
    /// 200 with a complete SSE body
    Events(String),
    /// 200 that sends one event and then never finishes
    Stalled(String),
    /// Non-success status with a JSON error body
    Error(StatusCode, String),
}

/// Mock vendor backend
pub struct MockVendor {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockVendorState>,
}

struct MockVendorState {
    reply: Reply,
    request_count: AtomicU32,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockVendor {
    /// Answer every request with these `data:` payloads, in order
    pub async fn streaming(events: &[String]) -> anyhow::Result<Self> {
        Self::start(Reply::Events(sse_body(events))).await
    }

    /// Answer with a raw SSE body, for named events
    pub async fn streaming_raw(body: &str) -> anyhow::Result<Self> {
        Self::start(Reply::Events(body.to_owned())).await
    }

    /// Send one event, then keep the response open forever
    pub async fn stalled(first_event: &str) -> anyhow::Result<Self> {
        Self::start(Reply::Stalled(sse_body(&[first_event.to_owned()]))).await
    }

    /// Fail every request with `status` and `body`
    pub async fn failing(status: u16, body: serde_json::Value) -> anyhow::Result<Self> {
        let status = StatusCode::from_u16(status)?;
        Self::start(Reply::Error(status, body.to_string())).await
    }

    async fn start(reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(MockVendorState {
            reply,
            request_count: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as a provider endpoint
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// The most recent request
    pub fn last_request(&self) -> RecordedRequest {
        self.state
            .requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("mock received no request")
    }
}

impl Drop for MockVendor {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Frame each payload as one `data:` event
pub fn sse_body(events: &[String]) -> String {
    events.iter().map(|data| format!("data: {data}\n\n")).collect()
}

async fn handle(State(state): State<Arc<MockVendorState>>, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let recorded = RecordedRequest {
        path: uri.path().to_owned(),
        query: uri.query().map(str::to_owned),
        headers,
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    };
    state.requests.lock().unwrap().push(recorded);

    match &state.reply {
        Reply::Events(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/event-stream")],
            body.clone(),
        )
            .into_response(),
        Reply::Stalled(first) => {
            let first = stream::once(std::future::ready(Ok::<_, Infallible>(Bytes::from(first.clone()))));
            let body = Body::from_stream(first.chain(stream::pending()));

            (StatusCode::OK, [(header::CONTENT_TYPE, "text/event-stream")], body).into_response()
        }
        Reply::Error(status, body) => {
            (*status, [(header::CONTENT_TYPE, "application/json")], body.clone()).into_response()
        }
    }
}
