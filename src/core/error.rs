//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type covering the registry and the
//! transports.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error raised by the capability registry.
    #[error("Registry error: {0}")]
    Registry(#[from] crate::registry::RegistryError),

    /// Error raised by a transport.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}
