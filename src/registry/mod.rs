//! Capability registry.
//!
//! Holds the named tools, resources and prompts a server exposes and
//! dispatches invocations to their handlers. The registry is built once at
//! start-up and shared read-only by every transport.
//!
//! ## Architecture
//!
//! - `capability.rs` - Capability kinds, parameter specs and entries
//! - `registry.rs` - `RegistryBuilder` and the frozen `CapabilityRegistry`
//! - `uri_template.rs` - Single-placeholder URI templates for keyed resources
//! - `error.rs` - Registry error types

mod capability;
mod error;
#[allow(clippy::module_inception)]
mod registry;
mod uri_template;

pub use capability::{
    CapabilityInfo, CapabilityKind, ParamSpec, ParamType, PromptArgSpec, PromptEntry,
    ResourceEntry, ToolEntry,
};
pub use error::RegistryError;
pub use registry::{CapabilityRegistry, JSON_MIME_TYPE, RegistryBuilder};
pub use uri_template::UriTemplate;
