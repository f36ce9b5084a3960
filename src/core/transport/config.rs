//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// Transport configuration options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport.
    #[cfg(feature = "stdio")]
    Stdio,

    /// Server-sent events push transport.
    #[cfg(feature = "http")]
    Sse(SseConfig),

    /// REST facade with the MCP adapter mounted.
    #[cfg(feature = "http")]
    Rest(RestConfig),
}

/// SSE transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SseConfig {
    /// Host address to bind to.
    #[serde(default = "default_sse_host")]
    pub host: String,

    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path of the event stream.
    #[serde(default = "default_sse_path")]
    pub sse_path: String,

    /// Path clients POST their messages to.
    #[serde(default = "default_message_path")]
    pub message_path: String,
}

/// REST transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestConfig {
    /// Host address to bind to.
    #[serde(default = "default_rest_host")]
    pub host: String,

    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path of the JSON-RPC adapter endpoint.
    #[serde(default = "default_mcp_path")]
    pub mcp_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
fn default_sse_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_rest_host() -> String {
    "0.0.0.0".to_string()
}

#[cfg(feature = "http")]
fn default_port() -> u16 {
    8000
}

#[cfg(feature = "http")]
fn default_sse_path() -> String {
    "/sse".to_string()
}

#[cfg(feature = "http")]
fn default_message_path() -> String {
    "/messages/".to_string()
}

#[cfg(feature = "http")]
fn default_mcp_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "http")]
        {
            Self::Sse(SseConfig::default())
        }

        #[cfg(all(not(feature = "http"), feature = "stdio"))]
        {
            Self::Stdio
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

#[cfg(feature = "http")]
impl Default for SseConfig {
    fn default() -> Self {
        Self {
            host: default_sse_host(),
            port: default_port(),
            sse_path: default_sse_path(),
            message_path: default_message_path(),
        }
    }
}

#[cfg(feature = "http")]
impl Default for RestConfig {
    fn default() -> Self {
        Self {
            host: default_rest_host(),
            port: default_port(),
            mcp_path: default_mcp_path(),
            enable_cors: default_cors(),
        }
    }
}

#[cfg(feature = "http")]
fn env_port(key: &str) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port)
}

impl TransportConfig {
    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Create an SSE transport config with default paths.
    #[cfg(feature = "http")]
    pub fn sse(host: impl Into<String>, port: u16) -> Self {
        Self::Sse(SseConfig {
            host: host.into(),
            port,
            ..Default::default()
        })
    }

    /// Create a REST transport config with default paths.
    #[cfg(feature = "http")]
    pub fn rest(host: impl Into<String>, port: u16) -> Self {
        Self::Rest(RestConfig {
            host: host.into(),
            port,
            ..Default::default()
        })
    }

    /// Override the bind address of a network transport.
    ///
    /// `None` keeps the configured value. STDIO ignores both.
    pub fn with_bind(mut self, host: Option<String>, port: Option<u16>) -> Self {
        match &mut self {
            #[cfg(feature = "stdio")]
            Self::Stdio => {
                let _ = (host, port);
            }
            #[cfg(feature = "http")]
            Self::Sse(SseConfig {
                host: cfg_host,
                port: cfg_port,
                ..
            })
            | Self::Rest(RestConfig {
                host: cfg_host,
                port: cfg_port,
                ..
            }) => {
                if let Some(host) = host {
                    *cfg_host = host;
                }
                if let Some(port) = port {
                    *cfg_port = port;
                }
            }
        }
        self
    }

    /// Load transport config from environment variables.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "stdio")]
            "stdio" => Self::Stdio,
            #[cfg(feature = "http")]
            "rest" => {
                let host = std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_rest_host());
                let mcp_path =
                    std::env::var("MCP_HTTP_MCP_PATH").unwrap_or_else(|_| default_mcp_path());
                let enable_cors = std::env::var("MCP_HTTP_CORS")
                    .map(|v| v.to_lowercase() != "false" && v != "0")
                    .unwrap_or(true);
                Self::Rest(RestConfig {
                    host,
                    port: env_port("MCP_HTTP_PORT"),
                    mcp_path,
                    enable_cors,
                })
            }
            #[cfg(feature = "http")]
            _ => {
                let host = std::env::var("MCP_SSE_HOST").unwrap_or_else(|_| default_sse_host());
                Self::Sse(SseConfig {
                    host,
                    port: env_port("MCP_SSE_PORT"),
                    ..Default::default()
                })
            }
            #[cfg(not(feature = "http"))]
            _ => Self::default(),
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO".to_string(),
            #[cfg(feature = "http")]
            Self::Sse(cfg) => format!("SSE on {}:{}{}", cfg.host, cfg.port, cfg.sse_path),
            #[cfg(feature = "http")]
            Self::Rest(cfg) => format!(
                "REST on {}:{} (MCP at {})",
                cfg.host, cfg.port, cfg.mcp_path
            ),
        }
    }

    /// Check if this transport is the STDIO mode.
    pub fn is_stdio(&self) -> bool {
        #[cfg(feature = "stdio")]
        {
            matches!(self, Self::Stdio)
        }
        #[cfg(not(feature = "stdio"))]
        {
            false
        }
    }
}

#[cfg(all(test, feature = "stdio", feature = "http"))]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_is_sse_on_localhost() {
        let config = TransportConfig::default();
        assert_eq!(config, TransportConfig::sse("127.0.0.1", 8000));
        assert!(!config.is_stdio());
    }

    #[test]
    fn test_rest_defaults() {
        let TransportConfig::Rest(cfg) = TransportConfig::rest("0.0.0.0", 8000) else {
            panic!("expected REST config");
        };
        assert_eq!(cfg, RestConfig::default());
        assert_eq!(cfg.mcp_path, "/mcp");
    }

    #[test]
    fn test_with_bind_overrides() {
        let config = TransportConfig::rest("0.0.0.0", 8000).with_bind(None, Some(9000));
        assert_eq!(config, TransportConfig::rest("0.0.0.0", 9000));

        let config = TransportConfig::default().with_bind(Some("0.0.0.0".into()), None);
        assert_eq!(config.description(), "SSE on 0.0.0.0:8000/sse");

        let config = TransportConfig::stdio().with_bind(Some("0.0.0.0".into()), Some(1));
        assert!(config.is_stdio());
    }

    #[test]
    fn test_from_env_selects_transport() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "REST");
            std::env::set_var("MCP_HTTP_PORT", "8123");
            std::env::set_var("MCP_HTTP_CORS", "false");
        }
        let TransportConfig::Rest(cfg) = TransportConfig::from_env() else {
            panic!("expected REST config");
        };
        assert_eq!(cfg.port, 8123);
        assert!(!cfg.enable_cors);

        unsafe {
            std::env::set_var("MCP_TRANSPORT", "stdio");
        }
        assert!(TransportConfig::from_env().is_stdio());

        unsafe {
            std::env::remove_var("MCP_TRANSPORT");
            std::env::remove_var("MCP_HTTP_PORT");
            std::env::remove_var("MCP_HTTP_CORS");
        }
    }

    #[test]
    fn test_serde_tagging() {
        let value = serde_json::to_value(TransportConfig::stdio()).unwrap();
        assert_eq!(value, serde_json::json!({"type": "stdio"}));

        let config: TransportConfig =
            serde_json::from_value(serde_json::json!({"type": "sse", "port": 9001})).unwrap();
        assert_eq!(config, TransportConfig::sse("127.0.0.1", 9001));
    }
}
