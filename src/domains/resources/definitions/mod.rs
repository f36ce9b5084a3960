//! Resource definitions module.
//!
//! Each resource is defined in its own file with:
//! - URI (or URI template) and metadata
//! - A read function producing the resource value
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Export it here
//! 4. Register in `register_resources()` in `resources/mod.rs`

pub mod server_info;
pub mod user_info;

pub use server_info::{ServerInfo, ServerInfoResource};
pub use user_info::UserInfoResource;

/// Trait for resource definitions.
///
/// Each resource must implement this trait to provide its metadata.
pub trait ResourceDefinition {
    /// The unique name of the resource.
    const NAME: &'static str;

    /// The URI, or a URI template with one `{placeholder}` for keyed resources.
    const URI: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;
}
