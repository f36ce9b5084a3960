//! Quickstart MCP Server Library
//!
//! A small Model Context Protocol server: one immutable registry of tools,
//! resources and prompts, exposed over stdio, SSE, or as a REST facade with
//! an MCP JSON-RPC adapter mounted on it.
//!
//! # Architecture
//!
//! - **registry**: Capability registry, built once and shared read-only
//! - **domains**: The capabilities this server declares
//!   - **tools**: `add`, `multiply`, `echo`
//!   - **resources**: `info://server`, `user://{user_id}/info`
//!   - **prompts**: `greeting`
//! - **core**: Configuration, errors, the MCP handler and transports
//! - **web**: REST facade, MCP adapter and OpenAPI document (feature `http`)
//!
//! # Example
//!
//! ```rust,no_run
//! use quickstart_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;
pub mod registry;

#[cfg(feature = "http")]
pub mod web;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use registry::{CapabilityKind, CapabilityRegistry, RegistryBuilder, RegistryError};
