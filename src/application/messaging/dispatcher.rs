//! Message dispatcher - Routes messages to event handlers and commands
//!
//! Every message passes once through:
//! 1. the event stage, where every event handler runs in load order;
//! 2. the prefix stage, when the body carries the command prefix;
//! 3. otherwise the no-prefix stage, scanning the command table in order.
//!
//! At most one command body runs per message.

use std::sync::Arc;
use crate::domain::entities::Message;
use crate::domain::traits::{Connection, Store};
use crate::infrastructure::plugins::PluginRegistry;
use crate::plugins::{CommandDescriptor, EventContext, ExecutionContext, FallbackHandler};
use super::authorization::{AuthorizationContext, AuthorizationResolver};
use super::isolation::{isolate, HandlerOutcome};
use super::parser::MessageParser;

/// Which command route a message took
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Message sent by the bot account itself
    Ignored,
    /// No command matched
    None,
    /// Prefixed command, by table key
    Command { key: String },
    /// No-prefix trigger, by table key
    NoPrefix { key: String },
    /// Prefixed message delegated to the fallback handler
    Fallback,
}

impl Route {
    /// Table key of the command that ran
    pub fn key(&self) -> Option<&str> {
        match self {
            Route::Command { key } | Route::NoPrefix { key } => Some(key),
            Route::Ignored | Route::None | Route::Fallback => None,
        }
    }
}

/// What happened while dispatching one message
#[derive(Debug, Clone)]
pub struct DispatchReport {
    pub authorization: AuthorizationContext,
    /// Event handler label and outcome, in run order
    pub events: Vec<(String, HandlerOutcome)>,
    pub route: Route,
    /// Outcome of the command or fallback, if one ran
    pub outcome: Option<HandlerOutcome>,
}

impl DispatchReport {
    fn new(authorization: AuthorizationContext) -> Self {
        Self {
            authorization,
            events: Vec::new(),
            route: Route::None,
            outcome: None,
        }
    }
}

/// Message dispatcher over a read-only registry
pub struct MessageDispatcher {
    registry: Arc<PluginRegistry>,
    parser: MessageParser,
    resolver: AuthorizationResolver,
    fallback: Option<Arc<dyn FallbackHandler>>,
}

impl MessageDispatcher {
    pub fn new(registry: Arc<PluginRegistry>, parser: MessageParser, resolver: AuthorizationResolver) -> Self {
        Self {
            registry,
            parser,
            resolver,
            fallback: None,
        }
    }

    /// Handler consulted when a prefixed message names no known command
    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackHandler>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Run one dispatch cycle for `message`
    pub async fn handle_message(
        &self,
        message: &Message,
        conn: Arc<dyn Connection>,
        store: Arc<dyn Store>,
        chat_update: serde_json::Value,
    ) -> DispatchReport {
        if message.from_me {
            let mut report = DispatchReport::new(AuthorizationContext::default());
            report.route = Route::Ignored;
            return report;
        }

        let auth = self.resolver.resolve(message, conn.as_ref()).await;
        let chat_update = Arc::new(chat_update);
        let mut report = DispatchReport::new(auth);

        self.run_events(message, &conn, &store, &chat_update, auth, &mut report).await;

        tracing::debug!(
            "[{}] {} {}: {}",
            message.chat_id,
            message.timestamp.format("%H:%M:%S"),
            message.sender,
            message.preview()
        );

        let Some(body) = message.text() else {
            return report;
        };

        if let Some(parsed) = self.parser.parse_command(body) {
            match self.registry.commands().get(&parsed.key) {
                Some(command) => {
                    let ctx = ExecutionContext {
                        conn,
                        text: parsed.text,
                        args: parsed.args,
                        is_admin: auth.is_admin,
                        is_owner: auth.is_owner,
                        registry: Arc::clone(&self.registry),
                    };
                    report.outcome = Some(self.run_command(command, message, ctx).await);
                    report.route = Route::Command { key: parsed.key };
                }
                None => {
                    if let Some(fallback) = &self.fallback {
                        let outcome = isolate("fallback", fallback.handle(message, conn, &chat_update)).await;
                        report.outcome = Some(outcome);
                        report.route = Route::Fallback;
                    }
                }
            }
            return report;
        }

        if let Some((key, command)) = self.find_no_prefix(body) {
            let ctx = ExecutionContext {
                conn,
                text: body.to_string(),
                args: body.split(' ').map(str::to_string).collect(),
                is_admin: auth.is_admin,
                is_owner: auth.is_owner,
                registry: Arc::clone(&self.registry),
            };
            report.outcome = Some(self.run_command(command, message, ctx).await);
            report.route = Route::NoPrefix { key: key.to_string() };
        }

        report
    }

    async fn run_events(
        &self,
        message: &Message,
        conn: &Arc<dyn Connection>,
        store: &Arc<dyn Store>,
        chat_update: &Arc<serde_json::Value>,
        auth: AuthorizationContext,
        report: &mut DispatchReport,
    ) {
        for event in self.registry.events() {
            let ctx = EventContext {
                conn: Arc::clone(conn),
                is_admin: auth.is_admin,
                is_bot_admin: auth.is_bot_admin,
                store: Arc::clone(store),
                chat_update: Arc::clone(chat_update),
            };
            let outcome = isolate(&event.label, event.body.main(message, ctx)).await;
            report.events.push((event.label.clone(), outcome));
        }
    }

    async fn run_command(
        &self,
        command: &CommandDescriptor,
        message: &Message,
        ctx: ExecutionContext,
    ) -> HandlerOutcome {
        isolate(&command.name, command.body.exec(message, ctx)).await
    }

    /// First no-prefix entry, in table order, whose key equals the lowercased
    /// body or whose pattern alias matches it
    fn find_no_prefix(&self, body: &str) -> Option<(&str, &Arc<CommandDescriptor>)> {
        let lower = body.to_lowercase();
        self.registry
            .commands()
            .iter()
            .filter(|(_, command)| command.is_no_prefix())
            .find(|(key, command)| {
                lower == key.to_lowercase() || command.patterns().any(|re| re.is_match(&lower))
            })
    }
}
