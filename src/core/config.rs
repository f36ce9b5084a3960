//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (and a `.env` file) or defaults.
//! Command-line flags are applied on top by the binary.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
///
/// Also the source of the `info://server` resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,

    /// Short human-readable description.
    pub description: String,

    /// Instructions sent to MCP clients on initialize.
    pub instructions: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "FastMCP-Server-Quickstart".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "A simple MCP server implementation".to_string(),
            instructions: "Quickstart MCP server. Tools: add, multiply, echo. \
                           Resources: info://server, user://{user_id}/info. \
                           Prompts: greeting."
                .to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_TRANSPORT`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(description) = std::env::var("MCP_SERVER_DESCRIPTION") {
            config.server.description = description;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = timestamps.parse().unwrap_or(true);
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();
        debug!("Transport from environment: {}", config.transport.description());

        config
    }
}
