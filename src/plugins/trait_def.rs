//! Handler contracts and the contexts handed to them

use std::sync::Arc;
use async_trait::async_trait;
use crate::application::errors::HandlerError;
use crate::domain::entities::Message;
use crate::domain::traits::{Connection, Store};
use crate::infrastructure::plugins::PluginRegistry;

/// Result of a handler body
pub type HandlerResult = Result<(), HandlerError>;

/// Context passed to a command body
#[derive(Clone)]
pub struct ExecutionContext {
    pub conn: Arc<dyn Connection>,
    /// Text after the trigger (prefixed) or the full body (no-prefix)
    pub text: String,
    pub args: Vec<String>,
    pub is_admin: bool,
    pub is_owner: bool,
    /// Registry the command was dispatched from
    pub registry: Arc<PluginRegistry>,
}

/// Context passed to an event body
#[derive(Clone)]
pub struct EventContext {
    pub conn: Arc<dyn Connection>,
    pub is_admin: bool,
    pub is_bot_admin: bool,
    pub store: Arc<dyn Store>,
    pub chat_update: Arc<serde_json::Value>,
}

/// Body of a command or no-prefix trigger
#[async_trait]
pub trait CommandBody: Send + Sync {
    async fn exec(&self, message: &Message, ctx: ExecutionContext) -> HandlerResult;
}

/// Body of an event handler, run for every inbound message
#[async_trait]
pub trait EventBody: Send + Sync {
    async fn main(&self, message: &Message, ctx: EventContext) -> HandlerResult;
}

/// Handler consulted when a prefixed message names no known command
#[async_trait]
pub trait FallbackHandler: Send + Sync {
    async fn handle(
        &self,
        message: &Message,
        conn: Arc<dyn Connection>,
        chat_update: &serde_json::Value,
    ) -> HandlerResult;
}
