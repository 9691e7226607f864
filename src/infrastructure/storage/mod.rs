//! Storage implementations: in-memory message store and JSON settings store

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::traits::{SettingsStore, Store};
use crate::domain::entities::{ChatSettings, InstallationSettings, Message, UserSettings};
use crate::application::errors::StorageError;

/// Messages kept per chat when no limit is configured
pub const DEFAULT_HISTORY_LIMIT: usize = 200;

/// In-memory message history, capped per chat. The oldest message is dropped
/// once a chat reaches the limit.
pub struct MemoryStore {
    limit: usize,
    messages: RwLock<HashMap<String, VecDeque<Message>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl MemoryStore {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            messages: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn save_message(&self, message: &Message) -> Result<(), StorageError> {
        if self.limit == 0 {
            return Ok(());
        }
        let mut messages = self.messages.write().await;
        let history = messages.entry(message.chat_id.clone()).or_default();
        while history.len() >= self.limit {
            history.pop_front();
        }
        history.push_back(message.clone());
        Ok(())
    }
}

/// Layout of the settings file
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
struct SettingsData {
    users: HashMap<String, UserSettings>,
    chats: HashMap<String, ChatSettings>,
    settings: HashMap<String, InstallationSettings>,
}

/// JSON file-backed settings store.
///
/// Records live in memory; `flush` writes the whole file.
pub struct JsonSettingsStore {
    path: PathBuf,
    data: RwLock<SettingsData>,
}

impl JsonSettingsStore {
    /// Open the store, reading `path` if it exists
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => SettingsData::default(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SettingsData::default(),
            Err(e) => return Err(e.into()),
        };
        tracing::info!(
            "Settings loaded from {}: {} users, {} chats",
            path.display(),
            data.users.len(),
            data.chats.len()
        );
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Flush every `interval` until the process exits
    pub fn spawn_flush_task(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = store.flush().await {
                    tracing::error!("Failed to write settings to {}: {}", store.path.display(), e);
                }
            }
        })
    }
}

#[async_trait]
impl SettingsStore for JsonSettingsStore {
    async fn user(&self, id: &str) -> Result<UserSettings, StorageError> {
        if let Some(record) = self.data.read().await.users.get(id) {
            return Ok(record.clone());
        }
        let mut data = self.data.write().await;
        Ok(data.users.entry(id.to_string()).or_default().clone())
    }

    async fn chat(&self, id: &str) -> Result<ChatSettings, StorageError> {
        if let Some(record) = self.data.read().await.chats.get(id) {
            return Ok(record.clone());
        }
        let mut data = self.data.write().await;
        Ok(data.chats.entry(id.to_string()).or_default().clone())
    }

    async fn installation(&self, bot_id: &str) -> Result<InstallationSettings, StorageError> {
        if let Some(record) = self.data.read().await.settings.get(bot_id) {
            return Ok(record.clone());
        }
        let mut data = self.data.write().await;
        Ok(data.settings.entry(bot_id.to_string()).or_default().clone())
    }

    async fn flush(&self) -> Result<(), StorageError> {
        let content = {
            let data = self.data.read().await;
            serde_json::to_string_pretty(&*data)?
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        // Write aside, then rename over the old file
        let staging = self.staging_path();
        tokio::fs::write(&staging, content).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}
