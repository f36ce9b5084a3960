//! Echo tool definition.
//!
//! Returns the message it was given, wrapped in an object.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ToolDefinition;

/// Parameters for the echo tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EchoParams {
    /// The message to send back.
    #[schemars(description = "Message to echo back")]
    pub message: String,
}

/// Structured output of the echo tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EchoResult {
    pub message: String,
}

/// Echo tool - returns the message unchanged.
pub struct EchoTool;

impl ToolDefinition for EchoTool {
    const NAME: &'static str = "echo";
    const DESCRIPTION: &'static str = "Echo a message back unchanged";

    type Params = EchoParams;
    type Output = EchoResult;

    fn execute(params: EchoParams) -> EchoResult {
        EchoResult {
            message: params.message,
        }
    }
}
