//! JSON-RPC 2.0 dispatch for the HTTP-based transports.
//!
//! The SSE transport and the `/mcp` adapter both route MCP methods through
//! [`process_request`], which delegates to the same [`McpServer`] helpers the
//! stdio handler uses.

use rmcp::{
    ErrorData as McpError, ServerHandler,
    model::{CallToolRequestParam, GetPromptRequestParam, ReadResourceRequestParam},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::core::McpServer;

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Parse error, for bodies that are not JSON-RPC at all.
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::error(None, -32700, msg)
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }

    /// Internal error.
    pub fn internal_error(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32603, msg)
    }

    /// Convert an MCP error, keeping its code and data.
    pub fn from_mcp_error(id: Option<Value>, err: McpError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code: err.code.0,
                message: err.message.to_string(),
                data: err.data,
            }),
        }
    }
}

/// Process a JSON-RPC message.
///
/// Returns `None` for notifications, which get no reply.
pub fn process_request(server: &McpServer, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    // Validate JSON-RPC version
    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::invalid_request(request.id));
    }

    if request.method.starts_with("notifications/") {
        debug!("Received notification: {}", request.method);
        return None;
    }

    info!("Processing {} request", request.method);
    let id = request.id.clone();

    let outcome = match request.method.as_str() {
        "initialize" => to_result(server.get_info()),
        "ping" => Ok(json!({})),
        "tools/list" => to_result(json!({ "tools": server.tool_list() })),
        "tools/call" => params::<CallToolRequestParam>(request.params).and_then(|p| {
            server
                .invoke_tool(&p.name, p.arguments)
                .map_err(Failure::Mcp)
                .and_then(to_result)
        }),
        "resources/list" => to_result(json!({ "resources": server.resource_list() })),
        "resources/templates/list" => {
            to_result(json!({ "resourceTemplates": server.resource_template_list() }))
        }
        "resources/read" => params::<ReadResourceRequestParam>(request.params).and_then(|p| {
            server
                .read(&p.uri)
                .map_err(Failure::Mcp)
                .and_then(to_result)
        }),
        "prompts/list" => to_result(json!({ "prompts": server.prompt_list() })),
        "prompts/get" => params::<GetPromptRequestParam>(request.params).and_then(|p| {
            server
                .render_prompt(&p.name, p.arguments)
                .map_err(Failure::Mcp)
                .and_then(to_result)
        }),
        _ => {
            warn!("Unknown method: {}", request.method);
            return Some(JsonRpcResponse::method_not_found(id));
        }
    };

    Some(match outcome {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(Failure::InvalidParams(msg)) => JsonRpcResponse::invalid_params(id, msg),
        Err(Failure::Mcp(err)) => JsonRpcResponse::from_mcp_error(id, err),
        Err(Failure::Internal(msg)) => JsonRpcResponse::internal_error(id, msg),
    })
}

enum Failure {
    InvalidParams(String),
    Mcp(McpError),
    Internal(String),
}

fn params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, Failure> {
    let params = params.ok_or_else(|| Failure::InvalidParams("Missing params".to_string()))?;
    serde_json::from_value(params).map_err(|e| Failure::InvalidParams(e.to_string()))
}

fn to_result<T: Serialize>(value: T) -> Result<Value, Failure> {
    serde_json::to_value(value).map_err(|e| Failure::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;

    fn server() -> McpServer {
        McpServer::new(Config::default()).unwrap()
    }

    fn request(method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    fn call(method: &str, params: Value) -> JsonRpcResponse {
        process_request(&server(), request(method, params)).unwrap()
    }

    fn error_code(response: &JsonRpcResponse) -> i32 {
        response.error.as_ref().map(|e| e.code).unwrap_or_default()
    }

    #[test]
    fn test_initialize_reports_server() {
        let response = call("initialize", json!({}));
        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "FastMCP-Server-Quickstart");
        assert!(result["capabilities"]["tools"].is_object());
        assert!(result["protocolVersion"].is_string());
    }

    #[test]
    fn test_ping() {
        assert_eq!(call("ping", json!({})).result, Some(json!({})));
    }

    #[test]
    fn test_tools_list() {
        let result = call("tools/list", json!({})).result.unwrap();
        let names: Vec<_> = result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["add", "multiply", "echo"]);
        assert_eq!(result["tools"][0]["inputSchema"]["type"], "object");
    }

    #[test]
    fn test_tools_call_text_is_json_value() {
        let response = call(
            "tools/call",
            json!({"name": "multiply", "arguments": {"a": 4, "b": 2.5}}),
        );
        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["type"], "text");
        assert_eq!(result["content"][0]["text"], "10.0");
    }

    #[test]
    fn test_tools_call_errors() {
        let response = call("tools/call", json!({"name": "divide", "arguments": {}}));
        assert_eq!(error_code(&response), -32602);

        let response = call("tools/call", json!({"name": "add", "arguments": {"a": "x"}}));
        assert_eq!(error_code(&response), -32602);

        let response = process_request(
            &server(),
            JsonRpcRequest {
                params: None,
                ..request("tools/call", json!({}))
            },
        )
        .unwrap();
        assert_eq!(error_code(&response), -32602);
    }

    #[test]
    fn test_resources() {
        let result = call("resources/list", json!({})).result.unwrap();
        assert_eq!(result["resources"][0]["uri"], "info://server");

        let result = call("resources/templates/list", json!({})).result.unwrap();
        assert_eq!(
            result["resourceTemplates"][0]["uriTemplate"],
            "user://{user_id}/info"
        );

        let result = call("resources/read", json!({"uri": "user://1/info"}))
            .result
            .unwrap();
        let text = result["contents"][0]["text"].as_str().unwrap();
        let value: Value = serde_json::from_str(text).unwrap();
        assert_eq!(value, json!({"name": "Alice", "email": "alice@example.com"}));

        let response = call("resources/read", json!({"uri": "user://1/avatar"}));
        assert_eq!(error_code(&response), -32002);
    }

    #[test]
    fn test_prompts() {
        let result = call("prompts/list", json!({})).result.unwrap();
        assert_eq!(result["prompts"][0]["name"], "greeting");

        let result = call("prompts/get", json!({"name": "greeting"})).result.unwrap();
        assert_eq!(result["messages"][0]["role"], "user");
        assert!(result["messages"][0]["content"]["text"].is_string());
    }

    #[test]
    fn test_protocol_errors() {
        assert_eq!(error_code(&call("tools/delete", json!({}))), -32601);

        let response = process_request(
            &server(),
            JsonRpcRequest {
                jsonrpc: "1.0".to_string(),
                ..request("ping", json!({}))
            },
        )
        .unwrap();
        assert_eq!(error_code(&response), -32600);
    }

    #[test]
    fn test_notifications_have_no_reply() {
        let notification = JsonRpcRequest {
            id: None,
            ..request("notifications/initialized", json!({}))
        };
        assert!(process_request(&server(), notification).is_none());
    }
}
