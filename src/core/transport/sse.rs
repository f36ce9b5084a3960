//! SSE transport implementation.
//!
//! Clients open an event stream at `GET /sse`. The first event, `endpoint`,
//! carries the URL to POST JSON-RPC messages to
//! (`/messages/?session_id=<id>`). Each POST is acknowledged with
//! `202 Accepted`; the reply arrives as a `message` event on the stream.

use axum::{
    Router,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, KeepAliveStream, Sse},
    },
    routing::{get, post},
};
use futures::Stream;
use serde::Deserialize;
use std::collections::HashMap;
use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{RwLock, mpsc};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::jsonrpc::{JsonRpcRequest, JsonRpcResponse, process_request};
use super::{TransportError, TransportResult, config::SseConfig};
use crate::core::McpServer;

type Sessions = Arc<RwLock<HashMap<String, mpsc::UnboundedSender<Event>>>>;

/// SSE transport handler.
pub struct SseTransport {
    config: SseConfig,
}

/// State shared by the stream and message handlers.
#[derive(Clone)]
struct SseState {
    server: McpServer,
    sessions: Sessions,
    message_path: String,
}

impl SseState {
    fn new(server: McpServer, message_path: impl Into<String>) -> Self {
        Self {
            server,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            message_path: message_path.into(),
        }
    }
}

/// Event stream of one session. Dropping it closes the session.
struct SessionStream {
    inner: UnboundedReceiverStream<Event>,
    session_id: String,
    sessions: Sessions,
}

impl Stream for SessionStream {
    type Item = Result<Event, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx).map(|event| event.map(Ok))
    }
}

impl Drop for SessionStream {
    fn drop(&mut self) {
        info!(session_id = %self.session_id, "SSE client disconnected");
        if let Ok(mut sessions) = self.sessions.try_write() {
            sessions.remove(&self.session_id);
            return;
        }
        // Lock is busy; finish the removal on the runtime.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let sessions = self.sessions.clone();
            let session_id = std::mem::take(&mut self.session_id);
            handle.spawn(async move {
                sessions.write().await.remove(&session_id);
            });
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionQuery {
    session_id: Option<String>,
}

impl SseTransport {
    /// Create a new SSE transport with the given config.
    pub fn new(config: SseConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the router serving the event stream and message endpoint.
    pub fn router(&self, server: McpServer) -> Router {
        let state = SseState::new(server, self.config.message_path.clone());

        Router::new()
            .route(&self.config.sse_path, get(handle_stream))
            .route(&self.config.message_path, post(handle_message))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Run the SSE transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (MCP over SSE)", addr);
        info!("  → Stream:   GET {}", self.config.sse_path);
        info!("  → Messages: POST {}?session_id=<id>", self.config.message_path);

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Open a new session and stream its replies.
async fn handle_stream(State(state): State<SseState>) -> Sse<KeepAliveStream<SessionStream>> {
    let session_id = Uuid::new_v4().simple().to_string();
    let (tx, rx) = mpsc::unbounded_channel();

    // The receiver is still held here, so this cannot fail.
    let endpoint = format!("{}?session_id={}", state.message_path, session_id);
    let _ = tx.send(Event::default().event("endpoint").data(endpoint));

    state.sessions.write().await.insert(session_id.clone(), tx);
    info!(session_id = %session_id, "SSE client connected");

    let stream = SessionStream {
        inner: UnboundedReceiverStream::new(rx),
        session_id,
        sessions: state.sessions.clone(),
    };
    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Accept a JSON-RPC message for an open session.
#[instrument(skip_all, fields(session_id))]
async fn handle_message(
    State(state): State<SseState>,
    Query(query): Query<SessionQuery>,
    body: Bytes,
) -> Response {
    let Some(session_id) = query.session_id else {
        return (StatusCode::BAD_REQUEST, "session_id is required").into_response();
    };
    tracing::Span::current().record("session_id", session_id.as_str());

    let Some(sender) = state.sessions.read().await.get(&session_id).cloned() else {
        warn!("Unknown session");
        return (StatusCode::NOT_FOUND, "Could not find session").into_response();
    };

    let request: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Could not parse message: {}", e);
            let reply = JsonRpcResponse::parse_error(e.to_string());
            push(&state, &session_id, &sender, &reply).await;
            return (StatusCode::BAD_REQUEST, "Could not parse message").into_response();
        }
    };

    if let Some(reply) = process_request(&state.server, request) {
        if !push(&state, &session_id, &sender, &reply).await {
            return (StatusCode::NOT_FOUND, "Could not find session").into_response();
        }
    }

    (StatusCode::ACCEPTED, "Accepted").into_response()
}

/// Send a reply on the session stream. A closed stream ends the session.
async fn push(
    state: &SseState,
    session_id: &str,
    sender: &mpsc::UnboundedSender<Event>,
    reply: &JsonRpcResponse,
) -> bool {
    let data = match serde_json::to_string(reply) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to serialize reply: {}", e);
            return true;
        }
    };

    if sender.send(Event::default().event("message").data(data)).is_err() {
        info!("SSE client disconnected");
        state.sessions.write().await.remove(session_id);
        return false;
    }
    true
}
