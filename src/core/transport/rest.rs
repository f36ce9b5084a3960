//! REST transport implementation.
//!
//! Serves the HTTP facade (one endpoint per capability) with the MCP
//! JSON-RPC adapter mounted on the same router.

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::{TransportError, TransportResult, config::RestConfig};
use crate::core::McpServer;
use crate::web;

/// REST transport handler.
pub struct RestTransport {
    config: RestConfig,
}

impl RestTransport {
    /// Create a new REST transport with the given config.
    pub fn new(config: RestConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the REST transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let tool_count = server.registry().tools().len();

        let mut app = web::app(&server, &self.config.mcp_path).layer(TraceLayer::new_for_http());

        // Add CORS if enabled
        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (REST facade, CORS {})", addr, cors_status);
        info!("  → Tools:    POST /tools/{{name}} ({} registered)", tool_count);
        info!("  → MCP:      POST {}", self.config.mcp_path);
        info!("  → Health:   GET /health");
        info!("  → OpenAPI:  GET /openapi.json");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}
