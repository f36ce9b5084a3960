//! Addition tool definition.

use schemars::JsonSchema;
use serde::Deserialize;

use super::ToolDefinition;

/// Parameters for the addition tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddParams {
    /// First operand.
    #[schemars(description = "First number")]
    pub a: f64,

    /// Second operand.
    #[schemars(description = "Second number")]
    pub b: f64,
}

/// Adds two numbers.
pub struct AddTool;

impl ToolDefinition for AddTool {
    const NAME: &'static str = "add";
    const DESCRIPTION: &'static str = "Add two numbers";

    type Params = AddParams;
    type Output = f64;

    fn execute(params: AddParams) -> f64 {
        params.a + params.b
    }
}
