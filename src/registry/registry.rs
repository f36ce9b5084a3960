//! The capability registry and its builder.
//!
//! Capabilities are declared once, through explicit [`RegistryBuilder`] calls,
//! and frozen into a [`CapabilityRegistry`]. Every front-end (stdio, SSE, the
//! REST facade and the `/mcp` adapter) reads the same registry through an
//! `Arc`; none of them can add or remove entries.

use rmcp::handler::server::tool::schema_for_type;
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::capability::{
    CapabilityInfo, CapabilityKind, ParamSpec, PromptArgSpec, PromptEntry, ResourceEntry,
    ResourceSource, ToolEntry,
};
use super::error::RegistryError;
use super::uri_template::UriTemplate;

/// MIME type reported for every JSON resource.
pub const JSON_MIME_TYPE: &str = "application/json";

/// Collects capability declarations before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    tools: Vec<ToolEntry>,
    resources: Vec<ResourceEntry>,
    prompts: Vec<PromptEntry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// The parameter schema is generated from `P`; calls deserialize their
    /// arguments object into `P` before `handler` runs.
    pub fn add_tool<P, R, F>(
        &mut self,
        name: &str,
        description: &str,
        handler: F,
    ) -> Result<&mut Self, RegistryError>
    where
        P: DeserializeOwned + JsonSchema + 'static,
        R: Serialize,
        F: Fn(P) -> R + Send + Sync + 'static,
    {
        if self.tools.iter().any(|t| t.name == name) {
            return Err(RegistryError::duplicate(CapabilityKind::Tool, name));
        }

        let input_schema = Arc::new(schema_for_type::<P>());
        let params = ParamSpec::from_schema(&input_schema);

        let tool_name = name.to_string();
        let call = move |arguments: Value| -> Result<Value, RegistryError> {
            let arguments = match arguments {
                Value::Null => Value::Object(Default::default()),
                Value::Object(map) => Value::Object(map),
                _ => {
                    return Err(RegistryError::invalid_arguments(
                        CapabilityKind::Tool,
                        &tool_name,
                        "arguments must be a JSON object",
                    ));
                }
            };

            let params: P = serde_json::from_value(arguments).map_err(|e| {
                RegistryError::invalid_arguments(CapabilityKind::Tool, &tool_name, e.to_string())
            })?;

            serde_json::to_value(handler(params)).map_err(|source| RegistryError::Serialization {
                name: tool_name.clone(),
                source,
            })
        };

        debug!("Registering tool: {}", name);
        self.tools.push(ToolEntry {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
            params,
            handler: Arc::new(call),
        });

        Ok(self)
    }

    /// Register a resource with a fixed URI.
    pub fn add_resource<R, F>(
        &mut self,
        name: &str,
        uri: &str,
        description: &str,
        handler: F,
    ) -> Result<&mut Self, RegistryError>
    where
        R: Serialize,
        F: Fn() -> R + Send + Sync + 'static,
    {
        self.ensure_resource_is_new(name, uri)?;

        let resource_name = name.to_string();
        let read = move || {
            serde_json::to_value(handler()).map_err(|source| RegistryError::Serialization {
                name: resource_name.clone(),
                source,
            })
        };

        debug!("Registering resource: {} ({})", name, uri);
        self.resources.push(ResourceEntry {
            name: name.to_string(),
            uri: uri.to_string(),
            description: description.to_string(),
            mime_type: JSON_MIME_TYPE.to_string(),
            source: ResourceSource::Static(Arc::new(read)),
        });

        Ok(self)
    }

    /// Register a resource keyed by a single-placeholder URI template.
    pub fn add_resource_template<R, F>(
        &mut self,
        name: &str,
        uri_template: &str,
        description: &str,
        handler: F,
    ) -> Result<&mut Self, RegistryError>
    where
        R: Serialize,
        F: Fn(&str) -> R + Send + Sync + 'static,
    {
        self.ensure_resource_is_new(name, uri_template)?;
        let template = UriTemplate::parse(uri_template)?;

        let resource_name = name.to_string();
        let read = move |key: &str| {
            serde_json::to_value(handler(key)).map_err(|source| RegistryError::Serialization {
                name: resource_name.clone(),
                source,
            })
        };

        debug!("Registering resource template: {} ({})", name, uri_template);
        self.resources.push(ResourceEntry {
            name: name.to_string(),
            uri: uri_template.to_string(),
            description: description.to_string(),
            mime_type: JSON_MIME_TYPE.to_string(),
            source: ResourceSource::Keyed {
                template,
                handler: Arc::new(read),
            },
        });

        Ok(self)
    }

    /// Register a prompt.
    pub fn add_prompt<F>(
        &mut self,
        name: &str,
        description: &str,
        arguments: Vec<PromptArgSpec>,
        handler: F,
    ) -> Result<&mut Self, RegistryError>
    where
        F: Fn(&HashMap<String, String>) -> String + Send + Sync + 'static,
    {
        if self.prompts.iter().any(|p| p.name == name) {
            return Err(RegistryError::duplicate(CapabilityKind::Prompt, name));
        }

        debug!("Registering prompt: {}", name);
        self.prompts.push(PromptEntry {
            name: name.to_string(),
            description: description.to_string(),
            arguments,
            handler: Arc::new(handler),
        });

        Ok(self)
    }

    /// Freeze the declarations.
    pub fn build(self) -> CapabilityRegistry {
        info!(
            "Capability registry ready: {} tools, {} resources, {} prompts",
            self.tools.len(),
            self.resources.len(),
            self.prompts.len()
        );

        CapabilityRegistry {
            tools: self.tools,
            resources: self.resources,
            prompts: self.prompts,
        }
    }

    fn ensure_resource_is_new(&self, name: &str, uri: &str) -> Result<(), RegistryError> {
        if self.resources.iter().any(|r| r.name == name) {
            return Err(RegistryError::duplicate(CapabilityKind::Resource, name));
        }
        if self.resources.iter().any(|r| r.uri == uri) {
            return Err(RegistryError::duplicate(CapabilityKind::Resource, uri));
        }
        Ok(())
    }
}

/// Immutable table of named tools, resources and prompts.
#[derive(Debug)]
pub struct CapabilityRegistry {
    tools: Vec<ToolEntry>,
    resources: Vec<ResourceEntry>,
    prompts: Vec<PromptEntry>,
}

impl CapabilityRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registered tools, in registration order.
    pub fn tools(&self) -> &[ToolEntry] {
        &self.tools
    }

    /// Registered resources (static and templated), in registration order.
    pub fn resources(&self) -> &[ResourceEntry] {
        &self.resources
    }

    /// Registered prompts, in registration order.
    pub fn prompts(&self) -> &[PromptEntry] {
        &self.prompts
    }

    pub fn tool(&self, name: &str) -> Option<&ToolEntry> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceEntry> {
        self.resources.iter().find(|r| r.name == name)
    }

    pub fn prompt(&self, name: &str) -> Option<&PromptEntry> {
        self.prompts.iter().find(|p| p.name == name)
    }

    /// Every declared capability: tools, then resources, then prompts.
    pub fn capabilities(&self) -> Vec<CapabilityInfo> {
        self.tools
            .iter()
            .map(ToolEntry::info)
            .chain(self.resources.iter().map(ResourceEntry::info))
            .chain(self.prompts.iter().map(PromptEntry::info))
            .collect()
    }

    /// Invoke a capability by kind and name.
    ///
    /// - tools take their arguments object as-is;
    /// - keyed resources read their placeholder from `arguments`;
    /// - prompts take an object of string arguments and return the rendered
    ///   text as a JSON string.
    pub fn invoke(
        &self,
        kind: CapabilityKind,
        name: &str,
        arguments: Value,
    ) -> Result<Value, RegistryError> {
        match kind {
            CapabilityKind::Tool => self.call_tool(name, arguments),
            CapabilityKind::Resource => {
                let entry = self
                    .resource(name)
                    .ok_or_else(|| RegistryError::not_found(kind, name))?;
                let key = entry
                    .template()
                    .and_then(|template| arguments.get(template.variable()))
                    .and_then(Value::as_str);
                entry.resolve(key)
            }
            CapabilityKind::Prompt => {
                let arguments = prompt_arguments(name, arguments)?;
                self.get_prompt(name, &arguments).map(Value::String)
            }
        }
    }

    /// Call a tool by name.
    pub fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, RegistryError> {
        self.tool(name)
            .ok_or_else(|| RegistryError::not_found(CapabilityKind::Tool, name))?
            .call(arguments)
    }

    /// Find the resource serving a concrete URI and the key bound from it.
    ///
    /// Fixed URIs win over templates.
    pub fn match_uri<'a>(&self, uri: &'a str) -> Option<(&ResourceEntry, Option<&'a str>)> {
        if let Some(entry) = self
            .resources
            .iter()
            .find(|r| !r.is_template() && r.uri == uri)
        {
            return Some((entry, None));
        }

        self.resources.iter().find_map(|entry| {
            entry
                .template()
                .and_then(|template| template.bind(uri))
                .map(|key| (entry, Some(key)))
        })
    }

    /// Read a resource by concrete URI.
    pub fn read_resource(&self, uri: &str) -> Result<(&ResourceEntry, Value), RegistryError> {
        let (entry, key) = self
            .match_uri(uri)
            .ok_or_else(|| RegistryError::not_found(CapabilityKind::Resource, uri))?;
        let value = entry.resolve(key)?;
        Ok((entry, value))
    }

    /// Render a prompt by name.
    pub fn get_prompt(
        &self,
        name: &str,
        arguments: &HashMap<String, String>,
    ) -> Result<String, RegistryError> {
        self.prompt(name)
            .ok_or_else(|| RegistryError::not_found(CapabilityKind::Prompt, name))?
            .render(arguments)
    }
}

/// Flatten a JSON arguments object into prompt string arguments.
fn prompt_arguments(name: &str, arguments: Value) -> Result<HashMap<String, String>, RegistryError> {
    match arguments {
        Value::Null => Ok(HashMap::new()),
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => (key, s),
                other => (key, other.to_string()),
            })
            .collect()),
        _ => Err(RegistryError::invalid_arguments(
            CapabilityKind::Prompt,
            name,
            "arguments must be a JSON object",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    #[derive(Debug, Deserialize, JsonSchema)]
    struct PairParams {
        a: f64,
        b: f64,
    }

    fn sample_registry() -> CapabilityRegistry {
        let mut builder = CapabilityRegistry::builder();
        builder
            .add_tool("sum", "Add two numbers", |p: PairParams| p.a + p.b)
            .unwrap()
            .add_resource("version", "info://version", "Version", || json!({"v": 1}))
            .unwrap()
            .add_resource_template("item", "item://{id}", "Item by id", |id: &str| {
                json!({ "id": id })
            })
            .unwrap()
            .add_prompt(
                "hello",
                "Say hello",
                vec![PromptArgSpec::required("name", "Who to greet")],
                |args| format!("Hello, {}!", args["name"]),
            )
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_duplicate_name_same_kind_fails() {
        let mut builder = RegistryBuilder::new();
        assert_ok!(builder.add_tool("sum", "first", |p: PairParams| p.a + p.b));

        let err = assert_err!(builder.add_tool("sum", "second", |p: PairParams| p.a * p.b));
        assert!(matches!(
            err,
            RegistryError::DuplicateName {
                kind: CapabilityKind::Tool,
                ..
            }
        ));
    }

    #[test]
    fn test_same_name_different_kinds_allowed() {
        let mut builder = RegistryBuilder::new();
        assert_ok!(builder.add_tool("thing", "a tool", |p: PairParams| p.a));
        assert_ok!(builder.add_resource("thing", "thing://one", "a resource", || 1));
        assert_ok!(builder.add_prompt("thing", "a prompt", vec![], |_| "text".to_string()));

        let registry = builder.build();
        assert_eq!(registry.capabilities().len(), 3);
    }

    #[test]
    fn test_duplicate_resource_uri_fails() {
        let mut builder = RegistryBuilder::new();
        assert_ok!(builder.add_resource("first", "info://server", "one", || 1));
        let err = assert_err!(builder.add_resource("second", "info://server", "two", || 2));
        assert!(matches!(err, RegistryError::DuplicateName { .. }));
    }

    #[test]
    fn test_invalid_template_rejected() {
        let mut builder = RegistryBuilder::new();
        let err = assert_err!(builder.add_resource_template(
            "pair",
            "pair://{a}/{b}",
            "two keys",
            |k: &str| k.to_string()
        ));
        assert!(matches!(err, RegistryError::InvalidTemplate { .. }));
    }

    #[test]
    fn test_invoke_tool() {
        let registry = sample_registry();
        let result = registry
            .invoke(CapabilityKind::Tool, "sum", json!({"a": 2, "b": 3.5}))
            .unwrap();
        assert_eq!(result, json!(5.5));
    }

    #[test]
    fn test_invoke_tool_invalid_arguments() {
        let registry = sample_registry();

        let err = registry.call_tool("sum", json!({"a": 1})).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArguments { .. }));

        let err = registry.call_tool("sum", json!({"a": "x", "b": 1})).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArguments { .. }));

        let err = registry.call_tool("sum", json!([1, 2])).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArguments { .. }));
    }

    #[test]
    fn test_invoke_unknown_is_not_found() {
        let registry = sample_registry();
        for kind in [
            CapabilityKind::Tool,
            CapabilityKind::Resource,
            CapabilityKind::Prompt,
        ] {
            let err = registry.invoke(kind, "missing", json!({})).unwrap_err();
            assert!(err.is_not_found(), "{kind} lookup should be NotFound");
        }
    }

    #[test]
    fn test_invoke_resources() {
        let registry = sample_registry();
        assert_eq!(
            registry
                .invoke(CapabilityKind::Resource, "version", Value::Null)
                .unwrap(),
            json!({"v": 1})
        );
        assert_eq!(
            registry
                .invoke(CapabilityKind::Resource, "item", json!({"id": "7"}))
                .unwrap(),
            json!({"id": "7"})
        );

        let err = registry
            .invoke(CapabilityKind::Resource, "item", json!({}))
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArguments { .. }));
    }

    #[test]
    fn test_read_resource_by_uri() {
        let registry = sample_registry();

        let (entry, value) = registry.read_resource("info://version").unwrap();
        assert_eq!(entry.name(), "version");
        assert_eq!(value, json!({"v": 1}));

        let (entry, value) = registry.read_resource("item://abc").unwrap();
        assert_eq!(entry.name(), "item");
        assert_eq!(value, json!({"id": "abc"}));

        assert!(registry.read_resource("nothing://here").unwrap_err().is_not_found());
    }

    #[test]
    fn test_invoke_prompt() {
        let registry = sample_registry();
        let text = registry
            .invoke(CapabilityKind::Prompt, "hello", json!({"name": "World"}))
            .unwrap();
        assert_eq!(text, json!("Hello, World!"));

        let err = registry
            .invoke(CapabilityKind::Prompt, "hello", json!({}))
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArguments { .. }));
    }

    #[test]
    fn test_tool_schema_params() {
        let registry = sample_registry();
        let tool = registry.tool("sum").unwrap();
        let names: Vec<_> = tool.params().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(tool.params().iter().all(|p| p.required));
    }

    #[test]
    fn test_tool_input_schema_is_shared_object() {
        let registry = sample_registry();
        let tool = registry.tool("sum").unwrap();

        let schema: &Arc<rmcp::model::JsonObject> = tool.input_schema();
        assert_eq!(schema.get("type"), Some(&json!("object")));
        assert!(schema["properties"].get("a").is_some());

        let copy = Arc::clone(schema);
        assert!(Arc::ptr_eq(&copy, tool.input_schema()));
    }
}
