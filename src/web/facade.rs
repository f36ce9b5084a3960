//! REST facade over the capability registry.
//!
//! Routes are generated from the registry, one per capability:
//!
//! | capability | route |
//! |------------|-------|
//! | tool `name` | `POST /tools/{name}` with a JSON arguments object |
//! | resource `scheme://rest` | `GET /resources/scheme/rest` |
//! | prompt `name` | `GET /prompts/{name}?arg=value` |
//!
//! A URI template's placeholder becomes a path parameter, so
//! `user://{user_id}/info` is served at `GET /resources/user/{user_id}/info`.

use axum::{
    Json, Router,
    extract::{Path, Query},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::error::ApiError;
use super::openapi;
use crate::core::McpServer;
use crate::registry::{CapabilityKind, CapabilityRegistry, RegistryError};

/// REST path of a resource URI, or `None` if the URI has no scheme.
pub fn resource_path(uri: &str) -> Option<String> {
    let (scheme, rest) = uri.split_once("://")?;
    if scheme.is_empty() || rest.is_empty() {
        return None;
    }
    Some(format!("/resources/{}/{}", scheme, rest.trim_start_matches('/')))
}

/// Path of a tool endpoint.
pub fn tool_path(name: &str) -> String {
    format!("/tools/{name}")
}

/// Path of a prompt endpoint.
pub fn prompt_path(name: &str) -> String {
    format!("/prompts/{name}")
}

/// Build the facade router.
pub fn router(server: &McpServer, mcp_path: &str) -> Router {
    let registry = server.registry().clone();

    let index = index_document(server, mcp_path);
    let spec = openapi::document(server, mcp_path);

    let mut router = Router::new()
        .route("/", get(move || async move { Json(index) }))
        .route("/health", get(health))
        .route("/openapi.json", get(move || async move { Json(spec) }));

    for tool in registry.tools() {
        let path = tool_path(tool.name());
        debug!("Mounting tool endpoint: POST {}", path);
        router = router.route(&path, tool_handler(registry.clone(), tool.name()));
    }

    for resource in registry.resources() {
        let Some(path) = resource_path(resource.uri()) else {
            warn!("Resource {} has no REST path, skipping", resource.uri());
            continue;
        };
        debug!("Mounting resource endpoint: GET {}", path);
        let name = resource.name().to_string();
        let handler = if resource.is_template() {
            keyed_resource_handler(registry.clone(), name)
        } else {
            static_resource_handler(registry.clone(), name)
        };
        router = router.route(&path, handler);
    }

    for prompt in registry.prompts() {
        let path = prompt_path(prompt.name());
        debug!("Mounting prompt endpoint: GET {}", path);
        router = router.route(&path, prompt_handler(registry.clone(), prompt.name()));
    }

    router
}

fn tool_handler(registry: Arc<CapabilityRegistry>, name: &str) -> axum::routing::MethodRouter {
    let name = name.to_string();
    post(move |Json(arguments): Json<Value>| {
        let registry = registry.clone();
        let name = name.clone();
        async move {
            registry
                .call_tool(&name, arguments)
                .map(Json)
                .map_err(ApiError::from)
        }
    })
}

fn static_resource_handler(
    registry: Arc<CapabilityRegistry>,
    name: String,
) -> axum::routing::MethodRouter {
    get(move || {
        let registry = registry.clone();
        let name = name.clone();
        async move { read_resource(&registry, &name, None) }
    })
}

fn keyed_resource_handler(
    registry: Arc<CapabilityRegistry>,
    name: String,
) -> axum::routing::MethodRouter {
    get(move |Path(key): Path<String>| {
        let registry = registry.clone();
        let name = name.clone();
        async move { read_resource(&registry, &name, Some(&key)) }
    })
}

fn read_resource(
    registry: &CapabilityRegistry,
    name: &str,
    key: Option<&str>,
) -> Result<Json<Value>, ApiError> {
    registry
        .resource(name)
        .ok_or_else(|| RegistryError::not_found(CapabilityKind::Resource, name))
        .and_then(|entry| entry.resolve(key))
        .map(Json)
        .map_err(|e| ApiError::from_registry(e, "path"))
}

fn prompt_handler(registry: Arc<CapabilityRegistry>, name: &str) -> axum::routing::MethodRouter {
    let name = name.to_string();
    get(move |Query(arguments): Query<HashMap<String, String>>| {
        let registry = registry.clone();
        let name = name.clone();
        async move {
            registry
                .get_prompt(&name, &arguments)
                .map(|prompt| Json(json!({ "prompt": prompt })))
                .map_err(|e| ApiError::from_registry(e, "query"))
        }
    })
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Fallback for unknown paths.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

fn index_document(server: &McpServer, mcp_path: &str) -> Value {
    let registry = server.registry();
    json!({
        "name": server.name(),
        "version": server.version(),
        "description": server.config().server.description,
        "endpoints": {
            "tools": registry.tools().iter().map(|t| tool_path(t.name())).collect::<Vec<_>>(),
            "resources": registry
                .resources()
                .iter()
                .filter_map(|r| resource_path(r.uri()))
                .collect::<Vec<_>>(),
            "prompts": registry.prompts().iter().map(|p| prompt_path(p.name())).collect::<Vec<_>>(),
            "mcp": mcp_path,
            "health": "/health",
            "openapi": "/openapi.json"
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_path() {
        assert_eq!(
            resource_path("info://server").as_deref(),
            Some("/resources/info/server")
        );
        assert_eq!(
            resource_path("user://{user_id}/info").as_deref(),
            Some("/resources/user/{user_id}/info")
        );
        assert_eq!(resource_path("no-scheme"), None);
        assert_eq!(resource_path("empty://"), None);
    }

    #[test]
    fn test_capability_paths() {
        assert_eq!(tool_path("add"), "/tools/add");
        assert_eq!(prompt_path("greeting"), "/prompts/greeting");
    }
}
