//! Plugin registry - the command table and event handler list
//!
//! Built once at startup and read-only afterwards, so dispatch needs no locks.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use crate::plugins::{CommandDescriptor, EventDescriptor, HandlerDescriptor};

/// Trigger key -> command, iterable in insertion order.
///
/// Keys are stored exactly as declared; re-inserting a key replaces the
/// command but keeps the key's original position.
#[derive(Debug, Default, Clone)]
pub struct CommandTable {
    entries: Vec<(String, Arc<CommandDescriptor>)>,
    index: HashMap<String, usize>,
}

impl CommandTable {
    pub fn insert(&mut self, key: impl Into<String>, command: Arc<CommandDescriptor>) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = command,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, command));
            }
        }
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, key: &str) -> Option<&Arc<CommandDescriptor>> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<CommandDescriptor>)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Registry for loaded handlers
#[derive(Debug, Default, Clone)]
pub struct PluginRegistry {
    commands: CommandTable,
    events: Vec<EventDescriptor>,
}

impl PluginRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Event handlers in load order
    pub fn events(&self) -> &[EventDescriptor] {
        &self.events
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

/// Collects descriptors during the load phase
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: PluginRegistry,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: HandlerDescriptor) -> &mut Self {
        match descriptor {
            HandlerDescriptor::Event(event) => {
                info!("Loaded event plugin: {}", event.label);
                self.registry.events.push(event);
            }
            HandlerDescriptor::Command(command) => {
                let command = Arc::new(command);
                info!("Loaded plugin: {}", command.name);
                self.registry.commands.insert(command.name.clone(), Arc::clone(&command));
                for alias in command.literal_aliases() {
                    self.registry.commands.insert(alias, Arc::clone(&command));
                }
            }
        }
        self
    }

    pub fn command(mut self, command: CommandDescriptor) -> Self {
        self.register(HandlerDescriptor::Command(command));
        self
    }

    pub fn event(mut self, event: EventDescriptor) -> Self {
        self.register(HandlerDescriptor::Event(event));
        self
    }

    pub fn build(self) -> PluginRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::domain::entities::Message;
    use crate::plugins::descriptor::Mode;
    use crate::plugins::{Alias, CommandBody, EventBody, EventContext, ExecutionContext, HandlerResult};

    struct Noop;

    #[async_trait]
    impl CommandBody for Noop {
        async fn exec(&self, _message: &Message, _ctx: ExecutionContext) -> HandlerResult {
            Ok(())
        }
    }

    #[async_trait]
    impl EventBody for Noop {
        async fn main(&self, _message: &Message, _ctx: EventContext) -> HandlerResult {
            Ok(())
        }
    }

    #[test]
    fn test_literal_aliases_are_table_keys_patterns_are_not() {
        let registry = PluginRegistry::builder()
            .command(
                CommandDescriptor::new("Ping", Arc::new(Noop))
                    .with_alias(Alias::parse("p").unwrap())
                    .with_alias(Alias::parse("/^ping$/i").unwrap())
                    .no_prefix(),
            )
            .build();

        let keys: Vec<&str> = registry.commands().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Ping", "p"]);
        assert!(registry.commands().get("ping").is_none());
        assert_eq!(registry.command_count(), 2);
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let first = Arc::new(CommandDescriptor::new("a", Arc::new(Noop)));
        let second = Arc::new(CommandDescriptor::new("b", Arc::new(Noop)));
        let replacement = Arc::new(CommandDescriptor::new("a2", Arc::new(Noop)));

        let mut table = CommandTable::default();
        table.insert("a", first);
        table.insert("b", second);
        table.insert("a", replacement);

        let order: Vec<(&str, &str)> = table.iter().map(|(k, c)| (k, c.name.as_str())).collect();
        assert_eq!(order, vec![("a", "a2"), ("b", "b")]);
    }

    #[test]
    fn test_events_keep_load_order() {
        let registry = PluginRegistry::builder()
            .event(EventDescriptor::new("_first", Arc::new(Noop)))
            .event(EventDescriptor::new("_second", Arc::new(Noop)))
            .build();

        let labels: Vec<&str> = registry.events().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["_first", "_second"]);
        assert_eq!(registry.command_count(), 0);
    }

    #[test]
    fn test_descriptor_modes() {
        let cmd = HandlerDescriptor::Command(CommandDescriptor::new("a", Arc::new(Noop)));
        let trigger = HandlerDescriptor::Command(CommandDescriptor::new("b", Arc::new(Noop)).no_prefix());
        let event = HandlerDescriptor::Event(EventDescriptor::new("_c", Arc::new(Noop)));
        assert_eq!(cmd.mode(), Mode::Command);
        assert_eq!(trigger.mode(), Mode::NoPrefixTrigger);
        assert_eq!(event.mode(), Mode::EventHandler);
    }
}
