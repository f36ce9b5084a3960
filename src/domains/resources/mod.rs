//! Resources domain module.
//!
//! Resources are read-only data addressed by URI: either a fixed URI
//! (`info://server`) or a template with one placeholder
//! (`user://{user_id}/info`).
//!
//! ## Architecture
//!
//! - `definitions/` - Individual resource definitions (one file per resource)
//! - `directory.rs` - The fixed sample user table

pub mod definitions;
pub mod directory;

pub use definitions::{ResourceDefinition, ServerInfo, ServerInfoResource, UserInfoResource};
pub use directory::{USER_NOT_FOUND, UserDirectory, UserLookup, UserRecord};

use std::sync::Arc;

use crate::core::config::ServerConfig;
use crate::registry::{RegistryBuilder, RegistryError};

/// Register every resource.
pub fn register_resources(
    builder: &mut RegistryBuilder,
    server: &ServerConfig,
) -> Result<(), RegistryError> {
    ServerInfoResource::register(builder, server)?;
    UserInfoResource::register(builder, Arc::new(UserDirectory::sample()))?;
    Ok(())
}

/// URIs (and URI templates) of all registered resources.
pub fn resource_uris() -> Vec<&'static str> {
    vec![ServerInfoResource::URI, UserInfoResource::URI]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::registry::CapabilityRegistry;

    #[test]
    fn test_register_resources() {
        let mut builder = CapabilityRegistry::builder();
        register_resources(&mut builder, &Config::default().server).unwrap();
        let registry = builder.build();

        let uris: Vec<_> = registry.resources().iter().map(|r| r.uri()).collect();
        assert_eq!(uris, resource_uris());
        assert!(!registry.resource("server_info").unwrap().is_template());
        assert!(registry.resource("user_info").unwrap().is_template());
    }
}
