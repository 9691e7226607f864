//! Per-user, per-chat and per-installation settings records
//!
//! Every field carries a default so that records persisted by older builds
//! are healed on load.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserSettings {
    pub banned: bool,
    pub banned_date: i64,
    pub limit: u32,
    pub premium: bool,
    pub premium_date: i64,
    pub warn: u32,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            banned: false,
            banned_date: 0,
            limit: 100,
            premium: false,
            premium_date: 0,
            warn: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatSettings {
    pub is_banned: bool,
    pub welcome: bool,
    pub autoread: bool,
    pub detect: bool,
    pub delete: bool,
    pub anti_virtex: bool,
    pub anti_link: bool,
    pub tikauto: bool,
    pub captcha: bool,
    pub anti_foto: bool,
    pub anti_video: bool,
    pub auto_jpm: bool,
    pub anti_porn: bool,
    pub anti_bot: bool,
    pub anti_spam: bool,
    pub freply: bool,
    pub simi: bool,
    pub ai: bool,
    pub ngetik: bool,
    pub auto_vn: bool,
    pub anti_sticker: bool,
    pub stiker: bool,
    pub anti_badword: bool,
    pub viewonce: bool,
    pub use_document: bool,
    pub anti_toxic: bool,
    pub expired: i64,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            is_banned: false,
            welcome: true,
            autoread: false,
            detect: false,
            delete: true,
            anti_virtex: false,
            anti_link: false,
            tikauto: false,
            captcha: false,
            anti_foto: false,
            anti_video: false,
            auto_jpm: false,
            anti_porn: false,
            anti_bot: true,
            anti_spam: false,
            freply: false,
            simi: false,
            ai: false,
            ngetik: false,
            auto_vn: false,
            anti_sticker: false,
            stiker: false,
            anti_badword: false,
            viewonce: false,
            use_document: false,
            anti_toxic: false,
            expired: 0,
        }
    }
}

/// Settings of one bot installation, keyed by the bot's own identity
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstallationSettings {
    #[serde(rename = "self")]
    pub self_mode: bool,
    pub autoread: bool,
    pub composing: bool,
    pub restrict: bool,
    pub autorestart: bool,
    pub gconly: bool,
    #[serde(rename = "restartDB")]
    pub restart_db: i64,
    pub status: i64,
    pub anticall: bool,
    pub clear: bool,
    pub clear_time: i64,
    pub freply: bool,
    pub akinator: serde_json::Map<String, serde_json::Value>,
}

impl Default for InstallationSettings {
    fn default() -> Self {
        Self {
            self_mode: false,
            autoread: false,
            composing: true,
            restrict: true,
            autorestart: true,
            gconly: true,
            restart_db: 0,
            status: 0,
            anticall: true,
            clear: true,
            clear_time: 0,
            freply: true,
            akinator: serde_json::Map::new(),
        }
    }
}
