//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: Settings and message persistence
//! - Plugins: Plugin unit discovery and the handler registry
//! - Adapters: Transport integrations (console)

pub mod config;
pub mod storage;
pub mod plugins;
pub mod adapters;
