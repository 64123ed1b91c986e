//! The public configuration facade.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::de::DeserializeOwned;

use super::options::LoadOptions;
use super::watch::{Change, Updates, Watchers, MAX_DISPATCH_ROUNDS};
use crate::domain::entities::{ConfigSource, SourceLog, MODULE_DEFAULTS};
use crate::domain::ports::{LoadedSources, SourceLoader};
use crate::domain::services::{
    equals_deep, extend_deep, fill_missing, lookup, make_immutable, resolve_deferred,
    run_strictness_checks, set_path, DEFAULT_MAX_DEPTH,
};
use crate::domain::value_objects::{ConfigWarning, KeyPath, Node, Property, Value};
use crate::error::{ConfigError, ConfigResult};
use crate::infrastructure::loader::FsSourceLoader;
use crate::infrastructure::parsers::to_json;

/// A merged, resolved configuration tree and everything that went into it.
///
/// The tree is frozen the first time a value is read successfully unless
/// mutations were allowed at construction.
#[derive(Debug)]
pub struct Config {
    root: Node,
    sources: SourceLog,
    warnings: Vec<ConfigWarning>,
    options: LoadOptions,
    freeze_pending: AtomicBool,
    watchers: Watchers,
}

impl Config {
    /// Load from the config directories and environment named in `options`.
    pub fn load(options: LoadOptions) -> ConfigResult<Self> {
        Self::from_loader(&FsSourceLoader::new(), options)
    }

    /// Load through any `SourceLoader`.
    pub fn from_loader(loader: &dyn SourceLoader, options: LoadOptions) -> ConfigResult<Self> {
        let loaded = loader.load_sources(&options)?;
        Self::assemble(loaded, options)
    }

    /// Build from sources that are already parsed, lowest precedence first.
    pub fn from_sources(sources: Vec<ConfigSource>, options: LoadOptions) -> ConfigResult<Self> {
        Self::assemble(
            LoadedSources {
                sources,
                warnings: Vec::new(),
            },
            options,
        )
    }

    fn assemble(loaded: LoadedSources, options: LoadOptions) -> ConfigResult<Self> {
        let root = Node::new();
        let mut log = SourceLog::new();
        for source in loaded.sources {
            tracing::debug!(source = %source.name, "merging config source");
            extend_deep(&root, &[&source.parsed]);
            log.push(source);
        }

        let resolved = resolve_deferred(&root);
        if resolved > 0 {
            tracing::debug!(count = resolved, "resolved deferred values");
        }

        let mut warnings: Vec<ConfigWarning> = options.warnings().to_vec();
        warnings.extend(loaded.warnings);

        let findings = run_strictness_checks(&log.file_names(), options.environments(), options.instance());
        for finding in findings {
            if options.is_strict() {
                return Err(ConfigError::StrictnessViolation {
                    message: finding.message,
                });
            }
            tracing::warn!("{finding}");
            warnings.push(finding);
        }

        let freeze_pending = AtomicBool::new(!options.allows_mutations());
        Ok(Self {
            root,
            sources: log,
            warnings,
            options,
            freeze_pending,
            watchers: Watchers::default(),
        })
    }

    /// Value at `path`. The first successful read freezes the tree.
    pub fn get<P: KeyPath + ?Sized>(&self, path: &P) -> ConfigResult<Value> {
        let value = self.find(path).ok_or_else(|| ConfigError::not_defined(path.dotted()))?;
        self.freeze_if_pending();
        Ok(value)
    }

    /// Value at `path`, deserialized from its JSON export.
    pub fn get_as<T, P>(&self, path: &P) -> ConfigResult<T>
    where
        T: DeserializeOwned,
        P: KeyPath + ?Sized,
    {
        let value = self.get(path)?;
        serde_json::from_value(to_json(&value)).map_err(|e| ConfigError::Deserialize {
            path: path.dotted(),
            message: e.to_string(),
        })
    }

    /// Whether `path` holds a value. Never freezes.
    pub fn has<P: KeyPath + ?Sized>(&self, path: &P) -> bool {
        self.find(path).is_some()
    }

    /// An empty path names nothing; it never addresses the root.
    fn find<P: KeyPath + ?Sized>(&self, path: &P) -> Option<Value> {
        let segments = path.segments();
        if segments.is_empty() {
            return None;
        }
        lookup(&self.root, &segments)
    }

    /// Write `value` at `path`, then notify observers.
    ///
    /// Observer follow-ups are applied in rounds; a write whose value is
    /// deep-equal to the current one is dropped without notifying. Fails with
    /// `RecursionLimitExceeded` if writes are still pending after
    /// `MAX_DISPATCH_ROUNDS` rounds.
    pub fn set<P: KeyPath + ?Sized>(&mut self, path: &P, value: impl Into<Value>) -> ConfigResult<()> {
        let mut queue: VecDeque<(String, Value)> = VecDeque::from([(path.dotted(), value.into())]);
        let mut rounds = 0;

        while let Some((first, _)) = queue.front() {
            if rounds == MAX_DISPATCH_ROUNDS {
                return Err(ConfigError::RecursionLimitExceeded {
                    path: first.clone(),
                    limit: MAX_DISPATCH_ROUNDS,
                });
            }
            rounds += 1;

            let batch: Vec<_> = queue.drain(..).collect();
            for (target, next) in batch {
                queue.extend(self.apply(target, next)?);
            }
        }
        Ok(())
    }

    fn apply(&self, path: String, value: Value) -> ConfigResult<Updates> {
        let segments = path.segments();
        let old = lookup(&self.root, &segments);
        if old.as_ref().is_some_and(|old| equals_deep(old, &value)) {
            return Ok(Vec::new());
        }
        set_path(&self.root, &segments, value.clone())?;
        if self.watchers.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.watchers.notify(&Change {
            path,
            old,
            new: value,
        }))
    }

    /// Register an observer for writes at or below `path` (`""` observes
    /// everything).
    pub fn watch<F>(&mut self, path: &str, observer: F)
    where
        F: Fn(&Change) -> Updates + Send + Sync + 'static,
    {
        self.watchers.add(path, Box::new(observer));
    }

    /// Register defaults for a module. Keys the module already has keep
    /// their values; missing keys are filled in even after the tree is
    /// frozen, and the new keys are frozen on the next read.
    pub fn set_module_defaults(&mut self, module: &str, defaults: &Node) -> ConfigResult<()> {
        self.sources.record_module_defaults(module, defaults)?;

        let mut target = self.root.clone();
        for segment in module.segments() {
            target = match target.get(&segment) {
                Some(Value::Node(child)) => child,
                Some(other) => {
                    return Err(ConfigError::malformed(
                        MODULE_DEFAULTS,
                        format!("\"{module}\" holds a {} value, not an object", other.kind()),
                    ))
                }
                None => {
                    let child = Node::new();
                    target.insert_missing(segment, Property::data(Value::Node(child.clone())));
                    child
                }
            };
        }
        fill_missing(&target, defaults, DEFAULT_MAX_DEPTH);

        let resolved = resolve_deferred(&self.root);
        if resolved > 0 {
            tracing::debug!(module, count = resolved, "resolved deferred module defaults");
        }

        if !self.options.allows_mutations() {
            self.freeze_pending.store(true, Ordering::Release);
        }
        Ok(())
    }

    fn freeze_if_pending(&self) {
        if self.freeze_pending.swap(false, Ordering::AcqRel) {
            make_immutable(&self.root);
            tracing::debug!("configuration frozen");
        }
    }

    /// Export the whole tree as plain JSON.
    pub fn to_object(&self) -> serde_json::Value {
        to_json(&Value::Node(self.root.clone()))
    }

    /// Export the value at `path` as plain JSON.
    pub fn to_object_at<P: KeyPath + ?Sized>(&self, path: &P) -> ConfigResult<serde_json::Value> {
        self.find(path)
            .map(|value| to_json(&value))
            .ok_or_else(|| ConfigError::not_defined(path.dotted()))
    }

    /// Shallow copy of the source log.
    pub fn sources(&self) -> Vec<ConfigSource> {
        self.sources.snapshot()
    }

    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn environments(&self) -> &[String] {
        self.options.environments()
    }

    pub fn instance(&self) -> Option<&str> {
        self.options.instance()
    }

    pub fn hostname(&self) -> Option<&str> {
        self.options.hostname()
    }

    pub fn config_dirs(&self) -> &[PathBuf] {
        self.options.config_dirs()
    }

    pub fn root(&self) -> &Node {
        &self.root
    }
}
