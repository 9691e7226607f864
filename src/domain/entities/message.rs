use chrono::{DateTime, Utc};

/// One inbound chat message, as decoded by the transport
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender: String,
    pub is_group: bool,
    pub from_me: bool,
    pub body: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub raw: serde_json::Value,
}

impl Message {
    pub fn new(chat_id: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chat_id: chat_id.into(),
            sender: sender.into(),
            is_group: false,
            from_me: false,
            body: None,
            timestamp: Utc::now(),
            raw: serde_json::Value::Null,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn in_group(mut self) -> Self {
        self.is_group = true;
        self
    }

    pub fn sent_by_me(mut self) -> Self {
        self.from_me = true;
        self
    }

    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = raw;
        self
    }

    /// Text body, `None` when absent or empty
    pub fn text(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.is_empty())
    }

    /// Short body preview for log lines
    pub fn preview(&self) -> String {
        self.text()
            .map(|s| s.chars().take(50).collect::<String>())
            .unwrap_or_else(|| "[no text]".to_string())
    }
}
