//! Resources domain module.
//!
//! Addressable market-data resources. Each resource URI maps to one or more
//! gateway calls whose responses are rendered with the same formatters the
//! tools use.

pub mod definitions;
mod error;
mod registry;
mod service;

pub use error::ResourceError;
pub use registry::{get_all_resource_templates, get_all_resources, resource_uri_templates};
pub use service::ResourceService;
