use std::sync::Arc;
use async_trait::async_trait;
use crate::domain::entities::Message;
use crate::domain::traits::Connection;
use crate::plugins::{FallbackHandler, HandlerResult};

/// Tells the sender the command does not exist
pub struct UnknownCommand;

#[async_trait]
impl FallbackHandler for UnknownCommand {
    async fn handle(
        &self,
        message: &Message,
        conn: Arc<dyn Connection>,
        _chat_update: &serde_json::Value,
    ) -> HandlerResult {
        let body = message.text().unwrap_or_default();
        conn.send_text(&message.chat_id, &format!("Unknown command: {}", body)).await?;
        Ok(())
    }
}
