//! Domains module containing the capabilities the server exposes.
//!
//! Each subdomain declares one kind of capability and registers it with the
//! [`CapabilityRegistry`]:
//!
//! - **tools**: `add`, `multiply`, `echo`
//! - **resources**: `info://server`, `user://{user_id}/info`
//! - **prompts**: `greeting`

pub mod prompts;
pub mod resources;
pub mod tools;

use crate::core::Config;
use crate::registry::{CapabilityRegistry, RegistryError};

/// Build the registry holding every capability of this server.
pub fn build_registry(config: &Config) -> Result<CapabilityRegistry, RegistryError> {
    let mut builder = CapabilityRegistry::builder();
    tools::register_tools(&mut builder)?;
    resources::register_resources(&mut builder, &config.server)?;
    prompts::register_prompts(&mut builder)?;
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CapabilityKind;

    #[test]
    fn test_build_registry() {
        let registry = build_registry(&Config::default()).unwrap();
        let capabilities = registry.capabilities();

        let count = |kind| capabilities.iter().filter(|c| c.kind == kind).count();
        assert_eq!(count(CapabilityKind::Tool), 3);
        assert_eq!(count(CapabilityKind::Resource), 2);
        assert_eq!(count(CapabilityKind::Prompt), 1);
    }
}
