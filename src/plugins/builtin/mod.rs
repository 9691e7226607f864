//! Built-in handler bodies

mod help;
mod message_log;
mod ping;
mod unknown;

pub use help::Help;
pub use message_log::MessageLog;
pub use ping::Ping;
pub use unknown::UnknownCommand;

use std::sync::Arc;
use crate::infrastructure::plugins::PluginRegistry;
use super::catalog::HandlerCatalog;
use super::descriptor::{Alias, CommandDescriptor, EventDescriptor};

pub fn register(catalog: &mut HandlerCatalog) {
    catalog
        .add_command("ping", Arc::new(Ping))
        .add_command("help", Arc::new(Help))
        .add_event("message-log", Arc::new(MessageLog))
        .add_fallback("unknown-command", Arc::new(UnknownCommand));
}

/// Built-in commands and events, used when plugin units are not loaded
pub fn default_registry() -> PluginRegistry {
    PluginRegistry::builder()
        .command(
            CommandDescriptor::new("ping", Arc::new(Ping))
                .with_description("Check bot response time")
                .with_alias(Alias::Literal("p".to_string()))
                .no_prefix(),
        )
        .command(
            CommandDescriptor::new("help", Arc::new(Help))
                .with_description("Show available commands")
                .with_alias(Alias::Literal("menu".to_string())),
        )
        .event(EventDescriptor::new("_message_log", Arc::new(MessageLog)))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry() {
        let registry = default_registry();
        let keys: Vec<&str> = registry.commands().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["ping", "p", "help", "menu"]);
        assert!(registry.commands().get("p").unwrap().is_no_prefix());
        assert_eq!(registry.events()[0].label, "_message_log");
    }

    #[test]
    fn test_catalog_ids() {
        let catalog = HandlerCatalog::with_builtins();
        assert!(catalog.command("ping").is_some());
        assert!(catalog.command("help").is_some());
        assert!(catalog.event("message-log").is_some());
        assert!(catalog.fallback("unknown-command").is_some());
        assert!(catalog.command("message-log").is_none());
    }
}
