//! HTTP front-ends over the capability registry.
//!
//! - `facade.rs` - One REST endpoint per tool, resource and prompt
//! - `adapter.rs` - MCP JSON-RPC endpoint mounted on the same router
//! - `openapi.rs` - OpenAPI document for the facade
//! - `error.rs` - HTTP error bodies

pub mod adapter;
pub mod error;
pub mod facade;
pub mod openapi;

use axum::Router;

use crate::core::McpServer;

pub use error::ApiError;

/// The integrated application: facade routes, the adapter at `mcp_path`,
/// and a JSON 404 for everything else.
pub fn app(server: &McpServer, mcp_path: &str) -> Router {
    facade::router(server, mcp_path)
        .merge(adapter::router(server, mcp_path))
        .fallback(facade::not_found)
}
