//! User info resource definition.
//!
//! Keyed by `user://{user_id}/info`; the key is looked up in the sample
//! [`UserDirectory`].

use std::sync::Arc;

use super::ResourceDefinition;
use crate::domains::resources::directory::{UserDirectory, UserLookup};
use crate::registry::{RegistryBuilder, RegistryError};

/// User information resource (keyed).
pub struct UserInfoResource;

impl ResourceDefinition for UserInfoResource {
    const NAME: &'static str = "user_info";
    const URI: &'static str = "user://{user_id}/info";
    const DESCRIPTION: &'static str = "Contact information for a user by id";
}

impl UserInfoResource {
    pub fn read(directory: &UserDirectory, user_id: &str) -> UserLookup {
        directory.lookup(user_id)
    }

    /// Register the resource template backed by `directory`.
    pub fn register(
        builder: &mut RegistryBuilder,
        directory: Arc<UserDirectory>,
    ) -> Result<(), RegistryError> {
        builder.add_resource_template(Self::NAME, Self::URI, Self::DESCRIPTION, move |user_id| {
            Self::read(&directory, user_id)
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{CapabilityKind, CapabilityRegistry};
    use serde_json::json;

    fn registry() -> CapabilityRegistry {
        let mut builder = CapabilityRegistry::builder();
        UserInfoResource::register(&mut builder, Arc::new(UserDirectory::sample())).unwrap();
        builder.build()
    }

    #[test]
    fn test_user_info_by_uri() {
        let registry = registry();
        let (_, alice) = registry.read_resource("user://1/info").unwrap();
        assert_eq!(alice, json!({"name": "Alice", "email": "alice@example.com"}));

        let (_, bob) = registry.read_resource("user://2/info").unwrap();
        assert_eq!(bob, json!({"name": "Bob", "email": "bob@example.com"}));
    }

    #[test]
    fn test_unknown_user_is_not_an_error() {
        let registry = registry();
        let (_, missing) = registry.read_resource("user://anything-else/info").unwrap();
        assert_eq!(missing, json!({"error": "User not found"}));
    }

    #[test]
    fn test_user_info_by_name() {
        let registry = registry();
        let value = registry
            .invoke(CapabilityKind::Resource, "user_info", json!({"user_id": "1"}))
            .unwrap();
        assert_eq!(value["name"], "Alice");
    }
}
