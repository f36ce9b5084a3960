//! Prompts domain module.
//!
//! Prompts are named text templates returned to clients.

pub mod definitions;

pub use definitions::{GreetingPrompt, PromptDefinition};

use crate::registry::{RegistryBuilder, RegistryError};

/// Register every prompt.
pub fn register_prompts(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    GreetingPrompt::register(builder)?;
    Ok(())
}

/// Names of all registered prompts.
pub fn prompt_names() -> Vec<&'static str> {
    vec![GreetingPrompt::NAME]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CapabilityRegistry;
    use std::collections::HashMap;

    #[test]
    fn test_register_prompts() {
        let mut builder = CapabilityRegistry::builder();
        register_prompts(&mut builder).unwrap();
        let registry = builder.build();

        let names: Vec<_> = registry.prompts().iter().map(|p| p.name()).collect();
        assert_eq!(names, prompt_names());

        let text = registry.get_prompt("greeting", &HashMap::new()).unwrap();
        assert!(text.contains("current time"));
    }
}
