//! Registry error types.

use thiserror::Error;

use super::capability::CapabilityKind;

/// Errors raised while building or invoking the capability registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A capability with this name (or URI) already exists under the kind.
    #[error("{kind} '{name}' is already registered")]
    DuplicateName { kind: CapabilityKind, name: String },

    /// No capability with this name (or URI) exists under the kind.
    #[error("{kind} not found: {name}")]
    NotFound { kind: CapabilityKind, name: String },

    /// The arguments did not match the capability's parameter schema.
    #[error("Invalid arguments for {kind} '{name}': {reason}")]
    InvalidArguments {
        kind: CapabilityKind,
        name: String,
        reason: String,
    },

    /// A resource URI template could not be parsed.
    #[error("Invalid URI template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// A handler produced a value that could not be turned into JSON.
    #[error("Failed to serialize result of '{name}': {source}")]
    Serialization {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RegistryError {
    /// Create a "duplicate name" error.
    pub fn duplicate(kind: CapabilityKind, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
        }
    }

    /// Create a "not found" error.
    pub fn not_found(kind: CapabilityKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Create an "invalid arguments" error.
    pub fn invalid_arguments(
        kind: CapabilityKind,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArguments {
            kind,
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an "invalid template" error.
    pub fn invalid_template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error means the addressed capability does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
