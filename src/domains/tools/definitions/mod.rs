//! Tool definitions module.
//!
//! Each tool is defined in its own file with:
//! - A parameters struct (deserialized from the call arguments, schema via schemars)
//! - An `execute()` function holding the tool's logic
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file (e.g., `my_tool.rs`)
//! 2. Implement the `ToolDefinition` trait
//! 3. Export it here
//! 4. Register in `register_tools()` in `tools/mod.rs`

use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::registry::{RegistryBuilder, RegistryError};

pub mod add;
pub mod echo;
pub mod multiply;

pub use add::{AddParams, AddTool};
pub use echo::{EchoParams, EchoResult, EchoTool};
pub use multiply::{MultiplyParams, MultiplyTool};

/// Trait for tool definitions.
///
/// Each tool must implement this trait to provide its metadata and logic.
pub trait ToolDefinition: Sized + 'static {
    /// Tool name as registered in the registry.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Arguments object accepted by the tool.
    type Params: DeserializeOwned + JsonSchema + 'static;

    /// Value returned to the caller.
    type Output: Serialize;

    /// Execute the tool logic.
    fn execute(params: Self::Params) -> Self::Output;

    /// Register this tool with a registry builder.
    fn register(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
        builder.add_tool(Self::NAME, Self::DESCRIPTION, Self::execute)?;
        Ok(())
    }
}
