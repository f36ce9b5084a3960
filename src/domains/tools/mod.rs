//! Tools domain module.
//!
//! Tools are invocable operations with typed parameters. Each tool lives in
//! its own file under `definitions/` and is registered with the capability
//! registry by `register_tools()`.
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Implement `ToolDefinition`
//! 3. Export in `definitions/mod.rs`
//! 4. Add it to `register_tools()` below
//!
//! No transport needs to change: stdio, SSE, REST and `/mcp` all read the
//! registry.

pub mod definitions;

pub use definitions::{AddTool, EchoTool, MultiplyTool, ToolDefinition};

use crate::registry::{RegistryBuilder, RegistryError};

/// Register every tool.
pub fn register_tools(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    AddTool::register(builder)?;
    MultiplyTool::register(builder)?;
    EchoTool::register(builder)?;
    Ok(())
}

/// Names of all registered tools.
pub fn tool_names() -> Vec<&'static str> {
    vec![AddTool::NAME, MultiplyTool::NAME, EchoTool::NAME]
}
