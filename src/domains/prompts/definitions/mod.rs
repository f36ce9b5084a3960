//! Prompt definitions module.
//!
//! Each prompt is defined in its own file with:
//! - Metadata (name, description, arguments)
//! - A render function producing the prompt text
//!
//! ## Adding a New Prompt
//!
//! 1. Create a new file (e.g., `my_prompt.rs`)
//! 2. Implement the `PromptDefinition` trait
//! 3. Export it here
//! 4. Register in `register_prompts()` in `prompts/mod.rs`

use std::collections::HashMap;

use crate::registry::{PromptArgSpec, RegistryBuilder, RegistryError};

pub mod greeting;

pub use greeting::GreetingPrompt;

/// Trait for prompt definitions.
///
/// Each prompt must implement this trait to provide its metadata and text.
pub trait PromptDefinition: Sized + 'static {
    /// The unique name of the prompt.
    const NAME: &'static str;

    /// A description of what the prompt does.
    const DESCRIPTION: &'static str;

    /// The arguments this prompt accepts.
    fn arguments() -> Vec<PromptArgSpec> {
        Vec::new()
    }

    /// Render the prompt text. Required arguments are checked by the
    /// registry before this is called.
    fn render(arguments: &HashMap<String, String>) -> String;

    /// Register this prompt with a registry builder.
    fn register(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
        builder.add_prompt(Self::NAME, Self::DESCRIPTION, Self::arguments(), Self::render)?;
        Ok(())
    }
}
