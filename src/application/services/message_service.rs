use std::sync::Arc;
use crate::application::messaging::{DispatchReport, MessageDispatcher};
use crate::application::errors::StorageError;
use crate::domain::entities::{decode_identity, Message};
use crate::domain::traits::{Connection, SettingsStore, Store};

/// Entry point for every decoded inbound message
pub struct MessageService {
    dispatcher: Arc<MessageDispatcher>,
    settings: Arc<dyn SettingsStore>,
    store: Arc<dyn Store>,
}

impl MessageService {
    pub fn new(
        dispatcher: Arc<MessageDispatcher>,
        settings: Arc<dyn SettingsStore>,
        store: Arc<dyn Store>,
    ) -> Self {
        Self {
            dispatcher,
            settings,
            store,
        }
    }

    /// Initialize settings defaults, then dispatch. Returns `None` for
    /// messages sent by the bot account itself.
    pub async fn process(
        &self,
        message: Message,
        conn: Arc<dyn Connection>,
        chat_update: serde_json::Value,
    ) -> Option<DispatchReport> {
        if message.from_me {
            return None;
        }

        if let Err(e) = self.ensure_defaults(&message, conn.as_ref()).await {
            tracing::error!("[{}] Failed to initialize settings: {}", message.chat_id, e);
        }

        let store = Arc::clone(&self.store);
        Some(self.dispatcher.handle_message(&message, conn, store, chat_update).await)
    }

    async fn ensure_defaults(&self, message: &Message, conn: &dyn Connection) -> Result<(), StorageError> {
        let bot_id = decode_identity(&conn.own_identity());
        self.settings.user(&message.sender).await?;
        self.settings.installation(&bot_id).await?;
        self.settings.chat(&message.chat_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Mutex;
    use crate::application::errors::ConnectionError;
    use crate::application::messaging::dispatcher::Route;
    use crate::application::messaging::{AuthorizationResolver, MessageParser, PrefixMatcher};
    use crate::domain::entities::{ChatSettings, InstallationSettings, Participant, UserSettings};
    use crate::infrastructure::plugins::PluginRegistry;
    use crate::infrastructure::storage::MemoryStore;

    struct StubConnection;

    #[async_trait]
    impl Connection for StubConnection {
        fn own_identity(&self) -> String {
            "62999:2@s.whatsapp.net".to_string()
        }

        async fn group_roster(&self, _chat_id: &str) -> Result<Vec<Participant>, ConnectionError> {
            Ok(Vec::new())
        }

        async fn send_text(&self, _chat_id: &str, _text: &str) -> Result<String, ConnectionError> {
            Ok("sent".to_string())
        }
    }

    #[derive(Default)]
    struct RecordingSettings {
        touched: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SettingsStore for RecordingSettings {
        async fn user(&self, id: &str) -> Result<UserSettings, StorageError> {
            self.touched.lock().await.push(format!("user:{}", id));
            Ok(UserSettings::default())
        }

        async fn chat(&self, id: &str) -> Result<ChatSettings, StorageError> {
            self.touched.lock().await.push(format!("chat:{}", id));
            Ok(ChatSettings::default())
        }

        async fn installation(&self, bot_id: &str) -> Result<InstallationSettings, StorageError> {
            self.touched.lock().await.push(format!("installation:{}", bot_id));
            Ok(InstallationSettings::default())
        }

        async fn flush(&self) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn service(settings: Arc<RecordingSettings>) -> MessageService {
        let parser = MessageParser::new(PrefixMatcher::from_chars("/").unwrap());
        let resolver = AuthorizationResolver::new(Vec::new(), "@s.whatsapp.net");
        let dispatcher = MessageDispatcher::new(Arc::new(PluginRegistry::default()), parser, resolver);
        MessageService::new(Arc::new(dispatcher), settings, Arc::new(MemoryStore::default()))
    }

    #[tokio::test]
    async fn test_process_initializes_every_record() {
        let settings = Arc::new(RecordingSettings::default());
        let service = service(Arc::clone(&settings));
        let message = Message::new("120363@g.us", "62811@s.whatsapp.net").in_group().with_body("hi");

        let report = service
            .process(message, Arc::new(StubConnection), serde_json::Value::Null)
            .await
            .unwrap();
        assert_eq!(report.route, Route::None);

        let touched = settings.touched.lock().await.clone();
        assert_eq!(
            touched,
            vec![
                "user:62811@s.whatsapp.net",
                "installation:62999@s.whatsapp.net",
                "chat:120363@g.us",
            ]
        );
    }

    #[tokio::test]
    async fn test_own_messages_skip_settings_and_dispatch() {
        let settings = Arc::new(RecordingSettings::default());
        let service = service(Arc::clone(&settings));
        let message = Message::new("c", "62999@s.whatsapp.net").with_body("/ping").sent_by_me();

        let report = service
            .process(message, Arc::new(StubConnection), serde_json::Value::Null)
            .await;
        assert!(report.is_none());
        assert!(settings.touched.lock().await.is_empty());
    }
}
