//! MCP protocol adapter mounted on the facade.
//!
//! Accepts JSON-RPC 2.0 over `POST` and answers from the same registry the
//! facade routes were generated from, so tool and resource payloads match the
//! REST responses exactly.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, instrument, warn};

use crate::core::McpServer;
use crate::core::transport::jsonrpc::{JsonRpcRequest, JsonRpcResponse, process_request};

/// Router serving the adapter at `path`.
pub fn router(server: &McpServer, path: &str) -> Router {
    info!(
        "Mounting MCP adapter at {} ({} capabilities)",
        path,
        server.registry().capabilities().len()
    );
    Router::new()
        .route(path, post(handle_rpc))
        .with_state(server.clone())
}

/// Handle JSON-RPC requests.
///
/// Bodies that are not a JSON-RPC message get a `-32700` parse error, the
/// same reply the SSE transport pushes.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(State(server): State<McpServer>, body: Bytes) -> Response {
    let request: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Could not parse message: {}", e);
            let reply = JsonRpcResponse::parse_error(e.to_string());
            return (StatusCode::BAD_REQUEST, Json(reply)).into_response();
        }
    };
    tracing::Span::current().record("method", request.method.as_str());

    match process_request(&server, request) {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
