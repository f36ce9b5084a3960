//! Multiplication tool definition.

use schemars::JsonSchema;
use serde::Deserialize;

use super::ToolDefinition;

/// Parameters for the multiplication tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MultiplyParams {
    #[schemars(description = "First number")]
    pub a: f64,

    #[schemars(description = "Second number")]
    pub b: f64,
}

/// Multiplies two numbers.
pub struct MultiplyTool;

impl ToolDefinition for MultiplyTool {
    const NAME: &'static str = "multiply";
    const DESCRIPTION: &'static str = "Multiply two numbers";

    type Params = MultiplyParams;
    type Output = f64;

    fn execute(params: MultiplyParams) -> f64 {
        params.a * params.b
    }
}
