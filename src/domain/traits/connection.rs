use async_trait::async_trait;
use crate::domain::entities::Participant;
use crate::application::errors::ConnectionError;

/// Connection trait - the transport capability handed to handlers
#[async_trait]
pub trait Connection: Send + Sync {
    /// Identity of the bot account, possibly carrying a device part
    fn own_identity(&self) -> String;

    /// Fetch the participant roster of a group chat
    async fn group_roster(&self, chat_id: &str) -> Result<Vec<Participant>, ConnectionError>;

    /// Send a text message to a chat
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<String, ConnectionError>;
}
