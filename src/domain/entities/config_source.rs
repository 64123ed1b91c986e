//! Config source entity
//!
//! One origin of configuration data and the append-only log of every source
//! that contributed to a configuration, in application order.

use std::path::Path;

use crate::domain::services::{extend_deep, set_path};
use crate::domain::value_objects::{KeyPath, Node, Value};
use crate::error::ConfigResult;

/// Name of the implicit leading entry that collects module defaults.
pub const MODULE_DEFAULTS: &str = "Module Defaults";

#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// File path, override name, or `Module Defaults`
    pub name: String,
    /// Raw text the source was parsed from, when there was one
    pub original: Option<String>,
    pub parsed: Node,
}

impl ConfigSource {
    pub fn new(name: impl Into<String>, parsed: Node) -> Self {
        Self {
            name: name.into(),
            original: None,
            parsed,
        }
    }

    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = Some(original.into());
        self
    }

    /// Whether the source was read from a file rather than an override
    /// or module defaults.
    pub fn is_file(&self) -> bool {
        self.name != MODULE_DEFAULTS && !self.name.starts_with('$') && !self.name.starts_with("--")
    }

    /// Base file name of the source, used by the strictness checks.
    pub fn file_name(&self) -> String {
        Path::new(&self.name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SourceLog {
    entries: Vec<ConfigSource>,
}

impl SourceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: ConfigSource) {
        self.entries.push(source);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigSource> {
        self.entries.iter()
    }

    /// Shallow copy of the log; callers never get the live entries.
    pub fn snapshot(&self) -> Vec<ConfigSource> {
        self.entries.clone()
    }

    /// Base names of the file sources, in application order.
    pub fn file_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|s| s.is_file())
            .map(ConfigSource::file_name)
            .collect()
    }

    /// Merge `defaults` under `module` in the leading module-defaults entry,
    /// creating that entry at position 0 when it is missing.
    pub fn record_module_defaults(&mut self, module: &str, defaults: &Node) -> ConfigResult<()> {
        let needs_entry = self
            .entries
            .first()
            .map_or(true, |first| first.name != MODULE_DEFAULTS);
        if needs_entry {
            self.entries
                .insert(0, ConfigSource::new(MODULE_DEFAULTS, Node::new()));
        }

        let parsed = &self.entries[0].parsed;
        let segments = module.segments();
        let target = match crate::domain::services::lookup(parsed, &segments) {
            Some(Value::Node(existing)) => existing,
            _ => {
                let fresh = Node::new();
                set_path(parsed, &segments, Value::Node(fresh.clone()))?;
                fresh
            }
        };
        extend_deep(&target, &[defaults]);
        Ok(())
    }
}
