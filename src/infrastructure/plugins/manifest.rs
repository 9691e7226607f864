//! Plugin unit manifest definition

use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::application::errors::PluginError;

/// Declared shape of one plugin unit.
///
/// A command unit declares `name` and `exec`; an event unit lives in a file
/// whose name starts with `_` and declares `main`. Body ids refer to the
/// handler catalog.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PluginManifest {
    /// Primary trigger (required for commands)
    pub name: Option<String>,

    /// Human-readable description
    #[serde(alias = "description")]
    pub desc: Option<String>,

    /// Literal aliases and `/pattern/flags` aliases
    #[serde(default)]
    pub alias: Vec<String>,

    /// Whether the command also fires without the prefix
    #[serde(default)]
    pub no_prefix: bool,

    /// Command body id
    pub exec: Option<String>,

    /// Event body id
    pub main: Option<String>,
}

impl PluginManifest {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PluginError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PluginError::Load(format!("Failed to read manifest: {}", e)))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, PluginError> {
        serde_yaml::from_str(content)
            .map_err(|e| PluginError::Malformed(format!("Failed to parse manifest: {}", e)))
    }

    /// True when the unit declares no body at all
    pub fn has_no_body(&self) -> bool {
        self.exec.is_none() && self.main.is_none()
    }
}
