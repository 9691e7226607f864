use async_trait::async_trait;
use crate::domain::entities::{ChatSettings, InstallationSettings, Message, UserSettings};
use crate::application::errors::StorageError;

/// Store trait - message history capability handed to event handlers
#[async_trait]
pub trait Store: Send + Sync {
    async fn save_message(&self, message: &Message) -> Result<(), StorageError>;
}

/// Settings store - get-or-initialize access to persisted settings records
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn user(&self, id: &str) -> Result<UserSettings, StorageError>;
    async fn chat(&self, id: &str) -> Result<ChatSettings, StorageError>;
    async fn installation(&self, bot_id: &str) -> Result<InstallationSettings, StorageError>;

    /// Persist every record to the backing store
    async fn flush(&self) -> Result<(), StorageError>;
}
