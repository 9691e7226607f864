//! Handler descriptors produced at registration time

use std::fmt;
use std::sync::Arc;
use regex_lite::Regex;
use crate::application::errors::PluginError;
use super::trait_def::{CommandBody, EventBody};

/// Alternative trigger of a command
#[derive(Debug, Clone)]
pub enum Alias {
    /// Exact key, registered in the command table
    Literal(String),
    /// Matched against the full lowercased body in the no-prefix stage only
    Pattern(Regex),
}

impl Alias {
    /// Parse an alias declaration. `/body/flags` declares a pattern
    /// (only the `i` flag is understood), anything else is a literal.
    pub fn parse(raw: &str) -> Result<Self, PluginError> {
        let Some(rest) = raw.strip_prefix('/') else {
            return Ok(Alias::Literal(raw.to_string()));
        };
        let Some(end) = rest.rfind('/') else {
            return Ok(Alias::Literal(raw.to_string()));
        };

        let (body, flags) = (&rest[..end], &rest[end + 1..]);
        let mut source = String::new();
        for flag in flags.chars() {
            match flag {
                'i' => source.push_str("(?i)"),
                'g' | 'm' | 'u' => {}
                other => {
                    return Err(PluginError::Pattern {
                        pattern: raw.to_string(),
                        reason: format!("unsupported flag '{}'", other),
                    })
                }
            }
        }
        source.push_str(body);

        Regex::new(&source)
            .map(Alias::Pattern)
            .map_err(|e| PluginError::Pattern {
                pattern: raw.to_string(),
                reason: e.to_string(),
            })
    }
}

/// How a command may be triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Only via the command prefix
    Prefixed,
    /// Also when the whole body equals the key or matches a pattern alias
    NoPrefix,
}

/// Handler mode, fixed at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Command,
    NoPrefixTrigger,
    EventHandler,
}

/// A registered command
#[derive(Clone)]
pub struct CommandDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub aliases: Vec<Alias>,
    pub trigger: Trigger,
    pub body: Arc<dyn CommandBody>,
}

impl CommandDescriptor {
    pub fn new(name: impl Into<String>, body: Arc<dyn CommandBody>) -> Self {
        Self {
            name: name.into(),
            description: None,
            aliases: Vec::new(),
            trigger: Trigger::Prefixed,
            body,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_alias(mut self, alias: Alias) -> Self {
        self.aliases.push(alias);
        self
    }

    pub fn with_aliases(mut self, aliases: Vec<Alias>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn no_prefix(mut self) -> Self {
        self.trigger = Trigger::NoPrefix;
        self
    }

    pub fn is_no_prefix(&self) -> bool {
        self.trigger == Trigger::NoPrefix
    }

    pub fn mode(&self) -> Mode {
        match self.trigger {
            Trigger::Prefixed => Mode::Command,
            Trigger::NoPrefix => Mode::NoPrefixTrigger,
        }
    }

    /// Literal aliases, in declaration order
    pub fn literal_aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().filter_map(|a| match a {
            Alias::Literal(s) => Some(s.as_str()),
            Alias::Pattern(_) => None,
        })
    }

    /// Pattern aliases, in declaration order
    pub fn patterns(&self) -> impl Iterator<Item = &Regex> {
        self.aliases.iter().filter_map(|a| match a {
            Alias::Pattern(re) => Some(re),
            Alias::Literal(_) => None,
        })
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("trigger", &self.trigger)
            .finish_non_exhaustive()
    }
}

/// A registered event handler
#[derive(Clone)]
pub struct EventDescriptor {
    /// Unit the handler came from, used in log lines
    pub label: String,
    pub body: Arc<dyn EventBody>,
}

impl EventDescriptor {
    pub fn new(label: impl Into<String>, body: Arc<dyn EventBody>) -> Self {
        Self {
            label: label.into(),
            body,
        }
    }
}

impl fmt::Debug for EventDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDescriptor")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// A classified plugin unit
#[derive(Debug, Clone)]
pub enum HandlerDescriptor {
    Command(CommandDescriptor),
    Event(EventDescriptor),
}

impl HandlerDescriptor {
    pub fn mode(&self) -> Mode {
        match self {
            HandlerDescriptor::Command(cmd) => cmd.mode(),
            HandlerDescriptor::Event(_) => Mode::EventHandler,
        }
    }
}
