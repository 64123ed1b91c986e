//! Change observers
//!
//! An observer is registered on a path and fires for writes to that path or
//! anywhere below it. It may answer with follow-up writes, which are applied
//! in the next dispatch round.

use crate::domain::value_objects::{KeyPath, Value};

/// Dispatch rounds allowed per `Config::set` before giving up.
pub const MAX_DISPATCH_ROUNDS: usize = 20;

/// A write that changed the tree.
#[derive(Debug, Clone)]
pub struct Change {
    /// Dotted path that was written
    pub path: String,
    /// Previous value, if the path existed
    pub old: Option<Value>,
    pub new: Value,
}

/// Follow-up writes requested by an observer, as `(path, value)` pairs.
pub type Updates = Vec<(String, Value)>;

type Observer = Box<dyn Fn(&Change) -> Updates + Send + Sync>;

#[derive(Default)]
pub(crate) struct Watchers {
    observers: Vec<(Vec<String>, Observer)>,
}

impl Watchers {
    pub(crate) fn add(&mut self, path: &str, observer: Observer) {
        self.observers.push((split(path), observer));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Run every observer whose path is `change.path` or an ancestor of it,
    /// in registration order, collecting their follow-up writes.
    pub(crate) fn notify(&self, change: &Change) -> Updates {
        let changed = split(&change.path);
        let mut updates = Vec::new();
        for (path, observer) in &self.observers {
            if changed.starts_with(path) {
                updates.extend(observer(change));
            }
        }
        updates
    }
}

fn split(path: &str) -> Vec<String> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.segments()
    }
}

impl std::fmt::Debug for Watchers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watchers")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn change(path: &str) -> Change {
        Change {
            path: path.to_string(),
            old: None,
            new: Value::from(1),
        }
    }

    #[test]
    fn ancestors_and_exact_paths_fire() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut watchers = Watchers::default();
        for path in ["db", "db.port", "db.host", "", "cache"] {
            let fired = Arc::clone(&fired);
            let name = path.to_string();
            watchers.add(
                path,
                Box::new(move |_| {
                    fired.lock().unwrap().push(name.clone());
                    Vec::new()
                }),
            );
        }

        watchers.notify(&change("db.port"));

        assert_eq!(*fired.lock().unwrap(), vec!["db", "db.port", ""]);
    }

    #[test]
    fn sibling_prefixes_do_not_match() {
        let mut watchers = Watchers::default();
        watchers.add("db", Box::new(|_| vec![("hit".to_string(), Value::Null)]));
        assert!(watchers.notify(&change("dbx.port")).is_empty());
        assert_eq!(watchers.notify(&change("db")).len(), 1);
    }
}
