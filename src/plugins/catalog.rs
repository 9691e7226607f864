//! Handler catalog - compiled-in handler bodies addressable by id
//!
//! Plugin manifests name a body by id; the loader resolves it here. Nothing is
//! registered after startup.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use super::builtin;
use super::trait_def::{CommandBody, EventBody, FallbackHandler};

#[derive(Default, Clone)]
pub struct HandlerCatalog {
    commands: HashMap<String, Arc<dyn CommandBody>>,
    events: HashMap<String, Arc<dyn EventBody>>,
    fallbacks: HashMap<String, Arc<dyn FallbackHandler>>,
}

impl HandlerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding every built-in body
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        builtin::register(&mut catalog);
        catalog
    }

    pub fn add_command(&mut self, id: impl Into<String>, body: Arc<dyn CommandBody>) -> &mut Self {
        let id = id.into();
        debug!("Catalog command body: {}", id);
        self.commands.insert(id, body);
        self
    }

    pub fn add_event(&mut self, id: impl Into<String>, body: Arc<dyn EventBody>) -> &mut Self {
        let id = id.into();
        debug!("Catalog event body: {}", id);
        self.events.insert(id, body);
        self
    }

    pub fn add_fallback(&mut self, id: impl Into<String>, handler: Arc<dyn FallbackHandler>) -> &mut Self {
        let id = id.into();
        debug!("Catalog fallback: {}", id);
        self.fallbacks.insert(id, handler);
        self
    }

    pub fn command(&self, id: &str) -> Option<Arc<dyn CommandBody>> {
        self.commands.get(id).cloned()
    }

    pub fn event(&self, id: &str) -> Option<Arc<dyn EventBody>> {
        self.events.get(id).cloned()
    }

    pub fn fallback(&self, id: &str) -> Option<Arc<dyn FallbackHandler>> {
        self.fallbacks.get(id).cloned()
    }
}
