//! Layer merger
//!
//! Deep-merges configuration layers into a destination node. Sources are
//! applied left to right, so a later source wins on conflicting leaves:
//! - nested nodes merge key by key, keeping untouched siblings
//! - lists, dates and patterns replace the previous value wholesale
//! - containers are deep-copied into the destination, never aliased
//! - accessor properties are copied as accessors
//! - a deferred value remembers what it overrode as its `original`

use super::{clone_deep_with, DEFAULT_MAX_DEPTH};
use crate::domain::value_objects::{Node, Property, Slot, Value};
use crate::error::ConfigResult;

/// Merge `sources` into `destination` in order and return the destination.
pub fn extend_deep(destination: &Node, sources: &[&Node]) -> Node {
    extend_deep_with_depth(destination, sources, DEFAULT_MAX_DEPTH)
}

/// [`extend_deep`] with an explicit recursion budget.
///
/// Branches deeper than `depth` are left as they are in the destination.
pub fn extend_deep_with_depth(destination: &Node, sources: &[&Node], depth: usize) -> Node {
    for source in sources {
        merge_layer(destination, source, depth);
    }
    destination.clone()
}

fn merge_layer(destination: &Node, source: &Node, depth: usize) {
    if destination.ptr_eq(source) {
        return;
    }

    for (key, property) in source.properties() {
        let incoming = match property.slot() {
            Slot::Accessor(_) => {
                report(&key, destination.define(key.as_str(), property.clone()));
                continue;
            }
            Slot::Data(value) => value.clone(),
        };
        let existing = destination.get(&key);

        let outcome = match (existing, incoming) {
            (existing, Value::Deferred(deferred)) => {
                let deferred = match existing {
                    Some(Value::Deferred(previous)) => {
                        let original = previous.original().cloned();
                        deferred.with_original(original)
                    }
                    Some(previous) => deferred.with_original(Some(previous)),
                    None => deferred,
                };
                destination.set(key.as_str(), Value::Deferred(deferred))
            }
            (_, value @ (Value::Date(_) | Value::Regex(_))) => destination.set(key.as_str(), value),
            (Some(Value::Node(into)), Value::Node(from)) => {
                match depth.checked_sub(1) {
                    Some(next) => merge_layer(&into, &from, next),
                    None => tracing::warn!(key = %key, "merge depth exhausted; branch left unmerged"),
                }
                Ok(())
            }
            (_, value @ (Value::Node(_) | Value::List(_))) => {
                let copy = clone_deep_with(&value, depth.saturating_sub(1), true);
                destination.set(key.as_str(), copy)
            }
            (_, value) => destination.set(key.as_str(), value),
        };
        report(&key, outcome);
    }
}

fn report(key: &str, outcome: ConfigResult<()>) {
    if let Err(err) = outcome {
        tracing::debug!(key, %err, "merge skipped a frozen property");
    }
}

/// Copy keys from `defaults` that `destination` does not have yet, recursing
/// where both sides hold nodes. Existing values always win.
///
/// New keys are added even to nodes that no longer accept keys; this is how
/// module defaults registered after the first read reach a frozen tree.
pub(crate) fn fill_missing(destination: &Node, defaults: &Node, depth: usize) {
    for (key, property) in defaults.properties() {
        match (destination.get(&key), property.slot()) {
            (None, Slot::Data(value)) => {
                let copy = clone_deep_with(value, depth.saturating_sub(1), true);
                destination.insert_missing(key, Property::data(copy));
            }
            (None, Slot::Accessor(_)) => {
                destination.insert_missing(key, property.clone());
            }
            (Some(Value::Node(into)), Slot::Data(Value::Node(from))) => {
                if let Some(next) = depth.checked_sub(1) {
                    fill_missing(&into, from, next);
                }
            }
            _ => {}
        }
    }
}
