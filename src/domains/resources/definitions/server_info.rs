//! Server info resource definition.

use serde::{Deserialize, Serialize};

use super::ResourceDefinition;
use crate::core::config::ServerConfig;
use crate::registry::{RegistryBuilder, RegistryError};

/// Identification record returned by the server info resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

/// Server information resource (static).
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const NAME: &'static str = "server_info";
    const URI: &'static str = "info://server";
    const DESCRIPTION: &'static str = "Information about this MCP server";
}

impl ServerInfoResource {
    /// Build the record from the server configuration.
    pub fn read(config: &ServerConfig) -> ServerInfo {
        ServerInfo {
            name: config.name.clone(),
            version: config.version.clone(),
            description: config.description.clone(),
        }
    }

    /// Register the resource. The record is fixed for the life of the registry.
    pub fn register(builder: &mut RegistryBuilder, config: &ServerConfig) -> Result<(), RegistryError> {
        let info = Self::read(config);
        builder.add_resource(Self::NAME, Self::URI, Self::DESCRIPTION, move || info.clone())?;
        Ok(())
    }
}
