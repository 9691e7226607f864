//! Console adapter for development/testing
//!
//! Each stdin line becomes one inbound message. Lines starting with `g> `
//! are sent into a simulated group chat; a `/` marker would be read as a
//! command prefix. Lines starting with `me> ` arrive as sent by the bot
//! account itself.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::task::JoinSet;
use crate::application::errors::{BotError, ConnectionError};
use crate::application::services::MessageService;
use crate::domain::entities::{decode_identity, Message, Participant};
use crate::domain::traits::Connection;
use crate::infrastructure::config::ConsoleConfig;

const GROUP_MARKER: &str = "g> ";
const OWN_MARKER: &str = "me> ";

/// Console connection: replies go to stdout
pub struct ConsoleConnection {
    config: ConsoleConfig,
}

impl ConsoleConnection {
    pub fn new(config: ConsoleConfig) -> Self {
        Self { config }
    }

    fn roster(&self) -> Vec<Participant> {
        let own_id = decode_identity(&self.config.self_identity);
        let mut roster: Vec<Participant> = self
            .config
            .group_admins
            .iter()
            .map(|id| Participant::admin(id.clone()))
            .collect();
        for id in [&self.config.sender, &own_id] {
            if !roster.iter().any(|p| &p.id == id) {
                roster.push(Participant::member(id.clone()));
            }
        }
        roster
    }

    /// Turn one typed line into a message
    pub fn message_from_line(&self, line: &str) -> Message {
        let raw = serde_json::json!({ "source": "console", "line": line });
        if let Some(text) = line.strip_prefix(OWN_MARKER) {
            let own_id = decode_identity(&self.config.self_identity);
            return Message::new(&self.config.sender, own_id)
                .with_body(text)
                .sent_by_me()
                .with_raw(raw);
        }
        match line.strip_prefix(GROUP_MARKER) {
            Some(text) => Message::new(&self.config.group_id, &self.config.sender)
                .in_group()
                .with_body(text)
                .with_raw(raw),
            None => Message::new(&self.config.sender, &self.config.sender)
                .with_body(line)
                .with_raw(raw),
        }
    }
}

#[async_trait]
impl Connection for ConsoleConnection {
    fn own_identity(&self) -> String {
        self.config.self_identity.clone()
    }

    async fn group_roster(&self, chat_id: &str) -> Result<Vec<Participant>, ConnectionError> {
        if chat_id == self.config.group_id {
            Ok(self.roster())
        } else {
            Err(ConnectionError::GroupMetadata(chat_id.to_string()))
        }
    }

    async fn send_text(&self, chat_id: &str, text: &str) -> Result<String, ConnectionError> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("[BOT -> {}] {}\n", chat_id, text).as_bytes())
            .await
            .map_err(|e| ConnectionError::Send(e.to_string()))?;
        stdout.flush().await.map_err(|e| ConnectionError::Send(e.to_string()))?;
        Ok(uuid::Uuid::new_v4().to_string())
    }
}

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    conn: Arc<ConsoleConnection>,
}

impl ConsoleAdapter {
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            conn: Arc::new(ConsoleConnection::new(config)),
        }
    }

    /// Read stdin until EOF or `quit`, dispatching each line concurrently
    pub async fn run(&self, service: Arc<MessageService>) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode), type `quit` to stop");
        self.run_lines(service, BufReader::new(tokio::io::stdin())).await
    }

    /// Dispatch every line of `reader` and wait for all dispatches to finish
    pub async fn run_lines<R>(&self, service: Arc<MessageService>, reader: R) -> Result<(), BotError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        let mut tasks = JoinSet::new();

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| BotError::Internal(format!("stdin: {}", e)))?
        {
            let line = line.trim().to_string();
            if line == "quit" {
                break;
            }
            if line.is_empty() {
                continue;
            }

            let message = self.conn.message_from_line(&line);
            let chat_update = serde_json::json!({ "type": "notify", "source": "console" });
            let conn: Arc<dyn Connection> = self.conn.clone();
            let service = Arc::clone(&service);
            tasks.spawn(async move {
                if let Some(report) = service.process(message, conn, chat_update).await {
                    tracing::debug!(
                        route = ?report.route,
                        key = report.route.key().unwrap_or("-"),
                        events = report.events.len(),
                        outcome = %report.outcome.as_ref().map(ToString::to_string).unwrap_or_default(),
                        admin = report.authorization.is_admin,
                        "Dispatch finished"
                    );
                }
            });

            while let Some(done) = tasks.try_join_next() {
                log_join(done);
            }
        }

        if !tasks.is_empty() {
            tracing::info!("Waiting for {} in-flight messages", tasks.len());
        }
        while let Some(done) = tasks.join_next().await {
            log_join(done);
        }
        Ok(())
    }
}

fn log_join(result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        tracing::error!("Dispatch task failed: {}", e);
    }
}
