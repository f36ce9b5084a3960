//! Capability descriptors held by the registry.
//!
//! A capability is one named entry of a given [`CapabilityKind`]. Entries are
//! created by [`RegistryBuilder`](super::RegistryBuilder) and never change
//! afterwards; front-ends only read them.

use rmcp::model::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::error::RegistryError;
use super::uri_template::UriTemplate;

/// The three kinds of capability a server can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    /// An invocable operation with typed parameters.
    Tool,
    /// A read-only data provider, static or keyed by URI.
    Resource,
    /// A named text template.
    Prompt,
}

impl CapabilityKind {
    /// Lowercase label used in messages and serialized descriptors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tool => "tool",
            Self::Resource => "resource",
            Self::Prompt => "prompt",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive JSON types a parameter can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Number,
    Integer,
    String,
    Boolean,
    Array,
    Object,
}

impl ParamType {
    fn from_schema_type(value: &Value) -> Self {
        // Nullable fields come through as ["number", "null"].
        let name = match value {
            Value::String(s) => Some(s.as_str()),
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .find(|s| *s != "null"),
            _ => None,
        };

        match name {
            Some("number") => Self::Number,
            Some("integer") => Self::Integer,
            Some("string") => Self::String,
            Some("boolean") => Self::Boolean,
            Some("array") => Self::Array,
            _ => Self::Object,
        }
    }
}

/// One declared parameter of a capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ParamType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParamSpec {
    /// Flatten the top-level properties of a JSON Schema object.
    pub fn from_schema(schema: &JsonObject) -> Vec<Self> {
        let required: Vec<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
            return Vec::new();
        };

        properties
            .iter()
            .map(|(name, property)| Self {
                name: name.clone(),
                ty: property
                    .get("type")
                    .map(ParamType::from_schema_type)
                    .unwrap_or(ParamType::Object),
                required: required.contains(&name.as_str()),
                description: property
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
            .collect()
    }
}

/// Declared argument of a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptArgSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
}

impl PromptArgSpec {
    /// A required prompt argument.
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            required: true,
        }
    }

    /// An optional prompt argument.
    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            required: false,
        }
    }
}

/// Serializable summary of any capability, used for listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapabilityInfo {
    pub kind: CapabilityKind,
    pub name: String,
    pub description: String,
    /// Resource URI or URI template; `None` for tools and prompts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub params: Vec<ParamSpec>,
}

pub(crate) type ToolFn = Arc<dyn Fn(Value) -> Result<Value, RegistryError> + Send + Sync>;
pub(crate) type StaticResourceFn = Arc<dyn Fn() -> Result<Value, RegistryError> + Send + Sync>;
pub(crate) type KeyedResourceFn =
    Arc<dyn Fn(&str) -> Result<Value, RegistryError> + Send + Sync>;
pub(crate) type PromptFn = Arc<dyn Fn(&HashMap<String, String>) -> String + Send + Sync>;

/// A registered tool.
pub struct ToolEntry {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) input_schema: Arc<JsonObject>,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) handler: ToolFn,
}

impl ToolEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// JSON Schema of the tool's arguments object.
    pub fn input_schema(&self) -> &Arc<JsonObject> {
        &self.input_schema
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Run the handler. Arguments are validated by deserializing them into
    /// the tool's parameter type.
    pub fn call(&self, arguments: Value) -> Result<Value, RegistryError> {
        (self.handler)(arguments)
    }

    pub fn info(&self) -> CapabilityInfo {
        CapabilityInfo {
            kind: CapabilityKind::Tool,
            name: self.name.clone(),
            description: self.description.clone(),
            uri: None,
            params: self.params.clone(),
        }
    }
}

impl fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolEntry")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

pub(crate) enum ResourceSource {
    Static(StaticResourceFn),
    Keyed {
        template: UriTemplate,
        handler: KeyedResourceFn,
    },
}

/// A registered resource, either static or keyed by a URI template.
pub struct ResourceEntry {
    pub(crate) name: String,
    pub(crate) uri: String,
    pub(crate) description: String,
    pub(crate) mime_type: String,
    pub(crate) source: ResourceSource,
}

impl ResourceEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fixed URI, or the raw template for keyed resources.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The URI template for keyed resources.
    pub fn template(&self) -> Option<&UriTemplate> {
        match &self.source {
            ResourceSource::Static(_) => None,
            ResourceSource::Keyed { template, .. } => Some(template),
        }
    }

    pub fn is_template(&self) -> bool {
        self.template().is_some()
    }

    /// Produce the resource value. Keyed resources need a key; static
    /// resources ignore it.
    pub fn resolve(&self, key: Option<&str>) -> Result<Value, RegistryError> {
        match (&self.source, key) {
            (ResourceSource::Static(handler), _) => handler(),
            (ResourceSource::Keyed { handler, .. }, Some(key)) => handler(key),
            (ResourceSource::Keyed { template, .. }, None) => Err(
                RegistryError::invalid_arguments(
                    CapabilityKind::Resource,
                    &self.name,
                    format!("missing value for '{}'", template.variable()),
                ),
            ),
        }
    }

    pub fn info(&self) -> CapabilityInfo {
        let params = self
            .template()
            .map(|template| {
                vec![ParamSpec {
                    name: template.variable().to_string(),
                    ty: ParamType::String,
                    required: true,
                    description: None,
                }]
            })
            .unwrap_or_default();

        CapabilityInfo {
            kind: CapabilityKind::Resource,
            name: self.name.clone(),
            description: self.description.clone(),
            uri: Some(self.uri.clone()),
            params,
        }
    }
}

impl fmt::Debug for ResourceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceEntry")
            .field("name", &self.name)
            .field("uri", &self.uri)
            .finish_non_exhaustive()
    }
}

/// A registered prompt.
pub struct PromptEntry {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) arguments: Vec<PromptArgSpec>,
    pub(crate) handler: PromptFn,
}

impl PromptEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn arguments(&self) -> &[PromptArgSpec] {
        &self.arguments
    }

    /// Render the prompt after checking required arguments are present.
    pub fn render(&self, arguments: &HashMap<String, String>) -> Result<String, RegistryError> {
        if let Some(missing) = self
            .arguments
            .iter()
            .find(|arg| arg.required && !arguments.contains_key(&arg.name))
        {
            return Err(RegistryError::invalid_arguments(
                CapabilityKind::Prompt,
                &self.name,
                format!("missing required argument '{}'", missing.name),
            ));
        }

        Ok((self.handler)(arguments))
    }

    pub fn info(&self) -> CapabilityInfo {
        CapabilityInfo {
            kind: CapabilityKind::Prompt,
            name: self.name.clone(),
            description: self.description.clone(),
            uri: None,
            params: self
                .arguments
                .iter()
                .map(|arg| ParamSpec {
                    name: arg.name.clone(),
                    ty: ParamType::String,
                    required: arg.required,
                    description: arg.description.clone(),
                })
                .collect(),
        }
    }
}

impl fmt::Debug for PromptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptEntry")
            .field("name", &self.name)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_param_specs_from_schema() {
        let schema = schema(json!({
            "type": "object",
            "properties": {
                "a": { "type": "number", "format": "double", "description": "First operand" },
                "label": { "type": ["string", "null"] }
            },
            "required": ["a"]
        }));

        let params = ParamSpec::from_schema(&schema);
        assert_eq!(params.len(), 2);

        let a = params.iter().find(|p| p.name == "a").unwrap();
        assert_eq!(a.ty, ParamType::Number);
        assert!(a.required);
        assert_eq!(a.description.as_deref(), Some("First operand"));

        let label = params.iter().find(|p| p.name == "label").unwrap();
        assert_eq!(label.ty, ParamType::String);
        assert!(!label.required);
    }

    #[test]
    fn test_param_specs_without_properties() {
        let params = ParamSpec::from_schema(&schema(json!({ "type": "object" })));
        assert!(params.is_empty());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(CapabilityKind::Tool.to_string(), "tool");
        assert_eq!(
            serde_json::to_value(CapabilityKind::Resource).unwrap(),
            json!("resource")
        );
    }
}
