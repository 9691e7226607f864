use async_trait::async_trait;
use crate::domain::entities::Message;
use crate::plugins::{EventBody, EventContext, HandlerResult};

/// Records every inbound message in the message store
pub struct MessageLog;

#[async_trait]
impl EventBody for MessageLog {
    async fn main(&self, message: &Message, ctx: EventContext) -> HandlerResult {
        ctx.store.save_message(message).await?;
        tracing::trace!(
            id = %message.id,
            bot = %ctx.conn.own_identity(),
            admin = ctx.is_admin,
            bot_admin = ctx.is_bot_admin,
            update = %ctx.chat_update["type"],
            raw = %message.raw,
            "Stored message"
        );
        Ok(())
    }
}
