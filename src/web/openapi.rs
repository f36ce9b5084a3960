//! OpenAPI 3.1 description of the facade, generated from the registry.

use serde_json::{Map, Value, json};

use super::facade::{prompt_path, resource_path, tool_path};
use crate::core::McpServer;
use crate::registry::ResourceEntry;

const OPENAPI_VERSION: &str = "3.1.0";

/// Build the OpenAPI document for every registered capability.
pub fn document(server: &McpServer, mcp_path: &str) -> Value {
    let registry = server.registry();
    let mut paths = Map::new();

    for tool in registry.tools() {
        paths.insert(
            tool_path(tool.name()),
            json!({
                "post": {
                    "operationId": tool.name(),
                    "summary": tool.description(),
                    "tags": ["tools"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": { "schema": tool.input_schema().as_ref() }
                        }
                    },
                    "responses": json_responses(true)
                }
            }),
        );
    }

    for resource in registry.resources() {
        if let Some(path) = resource_path(resource.uri()) {
            paths.insert(path, resource_operation(resource));
        }
    }

    for prompt in registry.prompts() {
        let parameters: Vec<Value> = prompt
            .arguments()
            .iter()
            .map(|arg| {
                json!({
                    "name": arg.name,
                    "in": "query",
                    "required": arg.required,
                    "description": arg.description,
                    "schema": { "type": "string" }
                })
            })
            .collect();

        paths.insert(
            prompt_path(prompt.name()),
            json!({
                "get": {
                    "operationId": prompt.name(),
                    "summary": prompt.description(),
                    "tags": ["prompts"],
                    "parameters": parameters,
                    "responses": json_responses(!prompt.arguments().is_empty())
                }
            }),
        );
    }

    paths.insert(
        "/health".to_string(),
        json!({
            "get": {
                "operationId": "health",
                "summary": "Liveness check",
                "responses": json_responses(false)
            }
        }),
    );

    paths.insert(
        mcp_path.to_string(),
        json!({
            "post": {
                "operationId": "mcp",
                "summary": "MCP JSON-RPC 2.0 endpoint",
                "requestBody": {
                    "required": true,
                    "content": { "application/json": { "schema": { "type": "object" } } }
                },
                "responses": json_responses(false)
            }
        }),
    );

    json!({
        "openapi": OPENAPI_VERSION,
        "info": {
            "title": server.name(),
            "version": server.version(),
            "description": server.config().server.description
        },
        "paths": paths
    })
}

fn resource_operation(resource: &ResourceEntry) -> Value {
    let parameters: Vec<Value> = resource
        .template()
        .map(|template| {
            vec![json!({
                "name": template.variable(),
                "in": "path",
                "required": true,
                "schema": { "type": "string" }
            })]
        })
        .unwrap_or_default();

    json!({
        "get": {
            "operationId": resource.name(),
            "summary": resource.description(),
            "tags": ["resources"],
            "parameters": parameters,
            "responses": json_responses(false)
        }
    })
}

fn json_responses(validated: bool) -> Value {
    let mut responses = json!({
        "200": {
            "description": "Successful Response",
            "content": { "application/json": { "schema": {} } }
        }
    });
    if validated {
        responses["422"] = json!({ "description": "Validation Error" });
    }
    responses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;

    #[test]
    fn test_document_lists_every_capability() {
        let server = McpServer::new(Config::default()).unwrap();
        let doc = document(&server, "/mcp");

        assert_eq!(doc["openapi"], "3.1.0");
        assert_eq!(doc["info"]["title"], "FastMCP-Server-Quickstart");

        let paths = doc["paths"].as_object().unwrap();
        for path in [
            "/tools/add",
            "/tools/multiply",
            "/tools/echo",
            "/resources/info/server",
            "/resources/user/{user_id}/info",
            "/prompts/greeting",
            "/health",
            "/mcp",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_tool_request_body_uses_schema() {
        let server = McpServer::new(Config::default()).unwrap();
        let doc = document(&server, "/mcp");
        let schema = &doc["paths"]["/tools/add"]["post"]["requestBody"]["content"]
            ["application/json"]["schema"];
        assert_eq!(schema["type"], "object");
        assert!(schema["properties"]["a"].is_object());

        let params = &doc["paths"]["/resources/user/{user_id}/info"]["get"]["parameters"];
        assert_eq!(params[0]["name"], "user_id");
        assert_eq!(params[0]["in"], "path");
    }
}
