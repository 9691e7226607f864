//! Plugin loader - Scans the plugin directory and classifies each unit

use std::path::{Path, PathBuf};
use crate::application::errors::PluginError;
use crate::plugins::{Alias, CommandDescriptor, EventDescriptor, HandlerCatalog, HandlerDescriptor};
use super::manifest::PluginManifest;
use super::registry::{PluginRegistry, RegistryBuilder};

/// File names starting with this marker declare event units
pub const EVENT_UNIT_MARKER: char = '_';

/// Plugin loader
pub struct PluginLoader<'a> {
    plugin_dir: PathBuf,
    catalog: &'a HandlerCatalog,
}

impl<'a> PluginLoader<'a> {
    pub fn new(plugin_dir: impl Into<PathBuf>, catalog: &'a HandlerCatalog) -> Self {
        Self {
            plugin_dir: plugin_dir.into(),
            catalog,
        }
    }

    /// Load every unit under the plugin directory into a fresh registry
    pub fn load_all(&self) -> Result<PluginRegistry, PluginError> {
        let mut builder = RegistryBuilder::new();
        self.load_into(&mut builder)?;
        let registry = builder.build();

        tracing::info!(
            "Loaded {} commands and {} event handlers",
            registry.command_count(),
            registry.event_count()
        );
        Ok(registry)
    }

    /// Load every unit into an existing builder. A unit that fails to load is
    /// logged and skipped.
    pub fn load_into(&self, builder: &mut RegistryBuilder) -> Result<(), PluginError> {
        if !self.plugin_dir.exists() {
            tracing::warn!("Plugin directory does not exist, creating: {}", self.plugin_dir.display());
            std::fs::create_dir_all(&self.plugin_dir)?;
        }

        let mut files = Vec::new();
        collect_units(&self.plugin_dir, &mut files)?;

        for path in files {
            match self.load_unit(&path) {
                Ok(Some(descriptor)) => {
                    tracing::debug!("{} -> {:?}", path.display(), descriptor.mode());
                    builder.register(descriptor);
                }
                Ok(None) => {
                    tracing::debug!("Plugin unit registers nothing: {}", path.display());
                }
                Err(e) => {
                    tracing::warn!("Failed to load plugin from {}: {}", path.display(), e);
                }
            }
        }

        Ok(())
    }

    /// Load and classify a single unit
    pub fn load_unit(&self, path: &Path) -> Result<Option<HandlerDescriptor>, PluginError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| PluginError::Load(format!("Invalid file name: {}", path.display())))?;
        let manifest = PluginManifest::from_file(path)?;
        classify(file_name, &manifest, self.catalog)
    }
}

/// Recursively collect manifest files, directories before siblings in sorted order
fn collect_units(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), PluginError> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        match entry {
            Ok(e) => entries.push(e.path()),
            Err(e) => tracing::warn!("Failed to read directory entry: {}", e),
        }
    }
    entries.sort();

    for path in entries {
        if path.is_dir() {
            if let Err(e) = collect_units(&path, out) {
                tracing::warn!("Failed to scan {}: {}", path.display(), e);
            }
        } else if is_manifest(&path) {
            out.push(path);
        }
    }
    Ok(())
}

fn is_manifest(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Decide what a unit registers.
///
/// `Ok(None)` covers both a unit without any body and a unit that declares
/// neither an event entry point nor a trigger name.
pub fn classify(
    file_name: &str,
    manifest: &PluginManifest,
    catalog: &HandlerCatalog,
) -> Result<Option<HandlerDescriptor>, PluginError> {
    if manifest.has_no_body() {
        return Ok(None);
    }

    if file_name.starts_with(EVENT_UNIT_MARKER) {
        if let Some(main) = &manifest.main {
            let body = catalog
                .event(main)
                .ok_or_else(|| PluginError::UnknownBody(main.clone()))?;
            let label = file_name.split('.').next().unwrap_or(file_name);
            return Ok(Some(HandlerDescriptor::Event(EventDescriptor::new(label, body))));
        }
    }

    let Some(name) = &manifest.name else {
        return Ok(None);
    };
    let exec = manifest
        .exec
        .as_ref()
        .ok_or_else(|| PluginError::Malformed(format!("command '{}' declares no exec body", name)))?;
    let body = catalog
        .command(exec)
        .ok_or_else(|| PluginError::UnknownBody(exec.clone()))?;

    let aliases = manifest
        .alias
        .iter()
        .map(|a| Alias::parse(a))
        .collect::<Result<Vec<_>, _>>()?;

    let mut command = CommandDescriptor::new(name.clone(), body).with_aliases(aliases);
    if let Some(desc) = &manifest.desc {
        command = command.with_description(desc.clone());
    }
    if manifest.no_prefix {
        command = command.no_prefix();
    }
    Ok(Some(HandlerDescriptor::Command(command)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_plugin_dir() -> PathBuf {
        std::env::temp_dir().join(format!("plume-plugins-{}", uuid::Uuid::new_v4()))
    }

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_all_classifies_and_skips_broken_units() {
        let dir = temp_plugin_dir();
        write(&dir, "ping.yaml", "name: Ping\nalias: [p, pong, \"/^ping$/i\"]\nno-prefix: true\nexec: ping\n");
        write(&dir, "_log.yaml", "main: message-log\n");
        write(&dir, "tools/deep/hello.yml", "name: hello\nexec: ping\n");
        write(&dir, "broken.yaml", "name: [unclosed\n");
        write(&dir, "unknown.yaml", "name: ghost\nexec: does-not-exist\n");
        write(&dir, "nobody.yaml", "name: idle\n");
        write(&dir, "notes.txt", "name: ignored\nexec: ping\n");

        let catalog = HandlerCatalog::with_builtins();
        let registry = PluginLoader::new(&dir, &catalog).load_all().unwrap();

        let keys: Vec<&str> = registry.commands().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Ping", "p", "pong", "hello"]);
        assert_eq!(registry.event_count(), 1);
        assert_eq!(registry.events()[0].label, "_log");
        assert!(registry.commands().get("Ping").unwrap().is_no_prefix());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directory_is_created() {
        let dir = temp_plugin_dir();
        let catalog = HandlerCatalog::with_builtins();
        let registry = PluginLoader::new(&dir, &catalog).load_all().unwrap();

        assert!(dir.is_dir());
        assert_eq!(registry.command_count(), 0);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_classify_event_requires_marker() {
        let catalog = HandlerCatalog::with_builtins();
        let manifest = PluginManifest {
            main: Some("message-log".to_string()),
            ..Default::default()
        };

        let unmarked = classify("log.yaml", &manifest, &catalog).unwrap();
        assert!(unmarked.is_none());

        let marked = classify("_log.yaml", &manifest, &catalog).unwrap();
        assert!(matches!(marked, Some(HandlerDescriptor::Event(_))));
    }

    #[test]
    fn test_classify_marked_file_without_main_is_a_command() {
        let catalog = HandlerCatalog::with_builtins();
        let manifest = PluginManifest {
            name: Some("menu".to_string()),
            exec: Some("ping".to_string()),
            ..Default::default()
        };

        let descriptor = classify("_menu.yaml", &manifest, &catalog).unwrap();
        assert!(matches!(descriptor, Some(HandlerDescriptor::Command(c)) if c.name == "menu"));
    }

    #[test]
    fn test_classify_errors() {
        let catalog = HandlerCatalog::with_builtins();

        let no_exec = PluginManifest {
            name: Some("x".to_string()),
            main: Some("message-log".to_string()),
            ..Default::default()
        };
        assert!(matches!(classify("x.yaml", &no_exec, &catalog), Err(PluginError::Malformed(_))));

        let bad_event = PluginManifest {
            main: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(matches!(classify("_x.yaml", &bad_event, &catalog), Err(PluginError::UnknownBody(_))));

        let bad_alias = PluginManifest {
            name: Some("x".to_string()),
            exec: Some("ping".to_string()),
            alias: vec!["/[/".to_string()],
            ..Default::default()
        };
        assert!(matches!(classify("x.yaml", &bad_alias, &catalog), Err(PluginError::Pattern { .. })));
    }
}
