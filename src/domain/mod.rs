//! Domain layer - Core business objects and the capabilities the core consumes
//! 
//! This layer contains:
//! - Entities: Message, participants, identities, settings records
//! - Traits: Abstractions for infrastructure (Connection, Store, SettingsStore)

pub mod entities;
pub mod traits;
