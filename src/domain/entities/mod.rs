//! Domain entities - Core business objects with no external dependencies

pub mod identity;
pub mod message;
pub mod participant;
pub mod settings;

pub use identity::{decode_identity, OwnerSet, DEFAULT_IDENTITY_SUFFIX};
pub use message::Message;
pub use participant::Participant;
pub use settings::{ChatSettings, InstallationSettings, UserSettings};
