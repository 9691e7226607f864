use std::time::Instant;
use async_trait::async_trait;
use crate::domain::entities::Message;
use crate::plugins::{CommandBody, ExecutionContext, HandlerResult};

/// Replies with the round-trip time of a first reply
pub struct Ping;

#[async_trait]
impl CommandBody for Ping {
    async fn exec(&self, message: &Message, ctx: ExecutionContext) -> HandlerResult {
        let start = Instant::now();
        ctx.conn.send_text(&message.chat_id, "Testing response time...").await?;
        let elapsed = start.elapsed().as_millis();

        if ctx.is_admin {
            ctx.conn.send_text(&message.chat_id, "You are an admin").await?;
            if ctx.is_owner {
                ctx.conn.send_text(&message.chat_id, "You are an owner").await?;
            }
        } else {
            ctx.conn.send_text(&message.chat_id, "You are not an admin").await?;
        }

        ctx.conn
            .send_text(&message.chat_id, &format!("Pong!\nResponse: {}ms", elapsed))
            .await?;
        Ok(())
    }
}
