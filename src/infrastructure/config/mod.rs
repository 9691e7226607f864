//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::application::messaging::UnlistedParticipant;
use crate::domain::entities::DEFAULT_IDENTITY_SUFFIX;
use crate::infrastructure::storage::DEFAULT_HISTORY_LIMIT;

/// Characters accepted as a command prefix when none are configured
pub const DEFAULT_PREFIX: &str = "xzXZ/i!#$%+£¢€¥^°=¶∆×÷π√✓©®:;?&.-";

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub plugins: PluginConfig,
    pub authorization: AuthorizationConfig,
    pub storage: StorageConfig,
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    /// Set of characters, any one of which starts a command
    pub prefix: String,
    pub owners: Vec<String>,
    pub identity_suffix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PluginConfig {
    pub directory: PathBuf,
    pub auto_load: bool,
    /// Catalog id of the handler for unknown prefixed commands
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AuthorizationConfig {
    pub unlisted_participant: UnlistedParticipant,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StorageConfig {
    pub path: PathBuf,
    pub flush_interval_secs: u64,
    /// Messages kept in memory per chat; 0 keeps none
    pub history_limit: usize,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConsoleConfig {
    /// Identity of the bot account in console mode
    pub self_identity: String,
    /// Sender identity of typed messages
    pub sender: String,
    pub group_id: String,
    /// Admins of the simulated group; other senders are members
    pub group_admins: Vec<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "plume-bot".to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            owners: Vec::new(),
            identity_suffix: DEFAULT_IDENTITY_SUFFIX.to_string(),
        }
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./playground/plugins"),
            auto_load: true,
            fallback: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("database.json"),
            flush_interval_secs: 10,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            self_identity: "620000000000:1@s.whatsapp.net".to_string(),
            sender: "620000000001@s.whatsapp.net".to_string(),
            group_id: "120363000000000000@g.us".to_string(),
            group_admins: vec!["620000000001@s.whatsapp.net".to_string()],
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::InvalidValue("bot.prefix must not be empty".to_string()));
        }
        if self.storage.flush_interval_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "storage.flush-interval-secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();

        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            if !prefix.is_empty() {
                config.bot.prefix = prefix;
            }
        }

        if let Ok(owners) = std::env::var("BOT_OWNERS") {
            config.bot.owners = owners
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("bot:\n  prefix: \"/!\"\n  owners: [\"+62 811\"]\n").unwrap();
        assert_eq!(config.bot.prefix, "/!");
        assert_eq!(config.bot.owners, vec!["+62 811"]);
        assert_eq!(config.bot.identity_suffix, DEFAULT_IDENTITY_SUFFIX);
        assert_eq!(config.storage.flush_interval_secs, 10);
        assert_eq!(config.storage.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.authorization.unlisted_participant, UnlistedParticipant::Admin);
    }

    #[test]
    fn test_unlisted_participant_policy() {
        let config = Config::from_yaml("authorization:\n  unlisted-participant: member\n").unwrap();
        assert_eq!(config.authorization.unlisted_participant, UnlistedParticipant::Member);
    }

    #[test]
    fn test_storage_section() {
        let config = Config::from_yaml("storage:\n  path: data/db.json\n  history-limit: 5\n").unwrap();
        assert_eq!(config.storage.path, PathBuf::from("data/db.json"));
        assert_eq!(config.storage.history_limit, 5);
        assert_eq!(config.storage.flush_interval_secs, 10);
    }

    #[test]
    fn test_empty_prefix_is_rejected() {
        assert!(matches!(
            Config::from_yaml("bot:\n  prefix: \"\"\n"),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_default_config_round_trips() {
        let yaml = Config::default().to_yaml().unwrap();
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.bot.prefix, DEFAULT_PREFIX);
        assert_eq!(config.plugins.directory, PathBuf::from("./playground/plugins"));
    }

    #[test]
    fn test_load_env_owners() {
        std::env::set_var("BOT_OWNERS", "62811, 62822,");
        let config = Config::load_env();
        std::env::remove_var("BOT_OWNERS");
        assert_eq!(config.bot.owners, vec!["62811", "62822"]);
    }
}
