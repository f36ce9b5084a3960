//! Transport layer for the MCP server.
//!
//! This module provides different transport implementations:
//! - **STDIO**: Standard input/output via rmcp - feature: `stdio`
//! - **SSE**: Event stream plus message endpoint - feature: `http`
//! - **REST**: HTTP facade with the MCP adapter mounted - feature: `http`
//!
//! Each transport handles the connection lifecycle and delegates
//! message processing to the MCP server handler.
//!
//! # Feature Flags
//!
//! - `stdio` (default): STDIO transport - minimal dependencies
//! - `http` (default): SSE and REST transports - adds axum, tower, tower-http

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod jsonrpc;

#[cfg(feature = "http")]
pub mod rest;

#[cfg(feature = "http")]
pub mod sse;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

// Re-export configs for convenience
#[cfg(feature = "http")]
pub use config::{RestConfig, SseConfig};
