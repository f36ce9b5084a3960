//! MCP Server implementation.
//!
//! This module contains the server handler that implements the MCP protocol
//! on top of the [`CapabilityRegistry`]. The same handler drives the stdio
//! transport (through rmcp) and the JSON-RPC dispatcher shared by the SSE
//! transport and the `/mcp` adapter.
//!
//! **Adding a capability does NOT require modifying this file!** Everything
//! listed or invoked here is read from the registry.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::config::Config;
use crate::domains::build_registry;
use crate::registry::{CapabilityKind, CapabilityRegistry, RegistryError};

/// The main MCP server handler.
///
/// Cheap to clone: the configuration and registry are shared.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// The capabilities this server exposes.
    registry: Arc<CapabilityRegistry>,
}

impl McpServer {
    /// Create a new MCP server with every capability of this crate registered.
    pub fn new(config: Config) -> super::Result<Self> {
        let registry = build_registry(&config)?;
        Ok(Self::with_registry(config, Arc::new(registry)))
    }

    /// Create a server over an already-built registry.
    pub fn with_registry(config: Config, registry: Arc<CapabilityRegistry>) -> Self {
        Self {
            config: Arc::new(config),
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the capability registry.
    pub fn registry(&self) -> &Arc<CapabilityRegistry> {
        &self.registry
    }

    // ========================================================================
    // Registry → MCP model mapping (shared by every transport)
    // ========================================================================

    /// All registered tools as MCP tool models.
    pub fn tool_list(&self) -> Vec<Tool> {
        self.registry
            .tools()
            .iter()
            .map(|tool| Tool {
                name: tool.name().to_string().into(),
                description: Some(tool.description().to_string().into()),
                input_schema: tool.input_schema().clone(),
                annotations: None,
                output_schema: None,
                icons: None,
                meta: None,
                title: None,
            })
            .collect()
    }

    /// Call a tool and wrap its value as an MCP tool result.
    ///
    /// The text content is the JSON form of the value; object values are also
    /// returned as structured content.
    pub fn invoke_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = arguments.map(Value::Object).unwrap_or(Value::Null);
        let value = self
            .registry
            .call_tool(name, arguments)
            .map_err(to_mcp_error)?;

        let text =
            serde_json::to_string(&value).map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(CallToolResult {
            content: vec![Content::text(text)],
            structured_content: value.is_object().then_some(value),
            is_error: Some(false),
            meta: None,
        })
    }

    /// Resources with a fixed URI.
    pub fn resource_list(&self) -> Vec<Resource> {
        self.registry
            .resources()
            .iter()
            .filter(|entry| !entry.is_template())
            .map(|entry| {
                let mut raw = RawResource::new(entry.uri(), entry.name());
                raw.description = Some(entry.description().to_string());
                raw.mime_type = Some(entry.mime_type().to_string());
                raw.no_annotation()
            })
            .collect()
    }

    /// Resources addressed through a URI template.
    pub fn resource_template_list(&self) -> Vec<ResourceTemplate> {
        self.registry
            .resources()
            .iter()
            .filter(|entry| entry.is_template())
            .map(|entry| {
                RawResourceTemplate {
                    uri_template: entry.uri().to_string(),
                    name: entry.name().to_string(),
                    title: None,
                    description: Some(entry.description().to_string()),
                    mime_type: Some(entry.mime_type().to_string()),
                }
                .no_annotation()
            })
            .collect()
    }

    /// Read a resource by concrete URI. The value is returned as JSON text.
    pub fn read(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        let (entry, value) = self.registry.read_resource(uri).map_err(to_mcp_error)?;
        let text =
            serde_json::to_string(&value).map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: Some(entry.mime_type().to_string()),
                text,
                meta: None,
            }],
        })
    }

    /// All registered prompts as MCP prompt models.
    pub fn prompt_list(&self) -> Vec<Prompt> {
        self.registry
            .prompts()
            .iter()
            .map(|prompt| Prompt {
                name: prompt.name().to_string(),
                title: None,
                description: Some(prompt.description().to_string()),
                arguments: Some(
                    prompt
                        .arguments()
                        .iter()
                        .map(|arg| PromptArgument {
                            name: arg.name.clone(),
                            title: None,
                            description: arg.description.clone(),
                            required: Some(arg.required),
                        })
                        .collect(),
                ),
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Render a prompt as a single user message.
    pub fn render_prompt(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<GetPromptResult, McpError> {
        // Convert serde_json::Map to HashMap<String, String>
        let arguments: HashMap<String, String> = arguments
            .map(|map| {
                map.into_iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        let content = self
            .registry
            .get_prompt(name, &arguments)
            .map_err(to_mcp_error)?;

        Ok(GetPromptResult {
            description: self
                .registry
                .prompt(name)
                .map(|p| p.description().to_string()),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}

/// Map a registry error onto the MCP error codes.
pub fn to_mcp_error(err: RegistryError) -> McpError {
    match &err {
        RegistryError::NotFound {
            kind: CapabilityKind::Resource,
            ..
        } => McpError::resource_not_found(err.to_string(), None),
        RegistryError::NotFound { .. }
        | RegistryError::InvalidArguments { .. }
        | RegistryError::InvalidTemplate { .. } => {
            warn!("Rejected request: {}", err);
            McpError::invalid_params(err.to_string(), None)
        }
        RegistryError::DuplicateName { .. } | RegistryError::Serialization { .. } => {
            McpError::internal_error(err.to_string(), None)
        }
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.config.server.instructions.clone()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tool_list(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        self.invoke_tool(&request.name, request.arguments)
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        Ok(ListResourcesResult {
            resources: self.resource_list(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        Ok(ListResourceTemplatesResult {
            resource_templates: self.resource_template_list(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.read(&request.uri)
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        Ok(ListPromptsResult {
            prompts: self.prompt_list(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        self.render_prompt(&request.name, request.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server() -> McpServer {
        McpServer::new(Config::default()).unwrap()
    }

    fn args(value: Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    fn first_text(content: &[Content]) -> String {
        match &content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn test_tool_list_matches_registry() {
        let server = server();
        let names: Vec<_> = server.tool_list().iter().map(|t| t.name.to_string()).collect();
        assert_eq!(names, vec!["add", "multiply", "echo"]);
    }

    #[test]
    fn test_invoke_tool_scalar_result() {
        let server = server();
        let result = server.invoke_tool("add", args(json!({"a": 2, "b": 3}))).unwrap();
        assert_eq!(result.is_error, Some(false));
        assert!(result.structured_content.is_none());
        let value: Value = serde_json::from_str(&first_text(&result.content)).unwrap();
        assert_eq!(value, json!(5.0));
    }

    #[test]
    fn test_invoke_tool_object_result() {
        let server = server();
        let result = server
            .invoke_tool("echo", args(json!({"message": "hello"})))
            .unwrap();
        assert_eq!(result.structured_content, Some(json!({"message": "hello"})));
    }

    #[test]
    fn test_invoke_tool_errors() {
        let server = server();
        let err = server.invoke_tool("divide", None).unwrap_err();
        assert_eq!(err.code.0, -32602);

        let err = server.invoke_tool("add", args(json!({"a": 1}))).unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[test]
    fn test_resource_lists_split_static_and_templates() {
        let server = server();
        let resources = server.resource_list();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].raw.uri, "info://server");

        let templates = server.resource_template_list();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].raw.uri_template, "user://{user_id}/info");
    }

    #[test]
    fn test_read_resource() {
        let server = server();
        let result = server.read("user://2/info").unwrap();
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => {
                let value: Value = serde_json::from_str(text).unwrap();
                assert_eq!(value["name"], "Bob");
            }
            other => panic!("expected text contents, got {other:?}"),
        }

        let err = server.read("nothing://here").unwrap_err();
        assert_eq!(err.code.0, -32002);
    }

    #[test]
    fn test_render_prompt() {
        let server = server();
        let result = server.render_prompt("greeting", None).unwrap();
        assert_eq!(result.messages.len(), 1);

        let err = server.render_prompt("farewell", None).unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[test]
    fn test_get_info_reports_config() {
        let server = server();
        let info = server.get_info();
        assert_eq!(info.server_info.name, "FastMCP-Server-Quickstart");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_some());
    }
}
