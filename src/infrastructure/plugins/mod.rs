//! Plugin loading for plume-bot
//! 
//! Plugin units are YAML manifests discovered under the plugin directory at
//! startup. Each one binds a compiled-in handler body to its triggers.

pub mod loader;
pub mod manifest;
pub mod registry;

pub use loader::PluginLoader;
pub use registry::PluginRegistry;
