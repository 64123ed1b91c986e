//! Deferred value resolution
//!
//! One sweep over the merged tree in sorted key order. Every placeholder is
//! located first, then each is evaluated against the root and replaced in
//! place. A resolver sees the whole tree, including placeholders that have
//! not been replaced yet; there is no fixpoint iteration, so a deferred
//! value must not rely on another deferred value's resolved output.

use std::collections::HashSet;

use crate::domain::value_objects::{Deferred, List, Node, Slot, Value};

enum Site {
    Key(Node, String),
    Index(List, usize),
}

/// Resolve every deferred value reachable from `root`.
///
/// Returns how many were resolved.
pub fn resolve_deferred(root: &Node) -> usize {
    let mut pending = Vec::new();
    let mut visited = HashSet::new();
    collect_node(root, &mut pending, &mut visited);

    let count = pending.len();
    for (site, deferred) in pending {
        let mut resolved = deferred.resolve(root);
        if resolved.is_deferred() {
            tracing::warn!("resolver produced another deferred value; storing null");
            resolved = Value::Null;
        }
        let outcome = match &site {
            Site::Key(node, key) => node.set(key.as_str(), resolved),
            Site::Index(list, index) => list.set(*index, resolved),
        };
        if let Err(err) = outcome {
            tracing::warn!(%err, "could not replace deferred value");
        }
    }
    tracing::debug!(count, "resolved deferred values");
    count
}

fn collect_node(node: &Node, pending: &mut Vec<(Site, Deferred)>, visited: &mut HashSet<usize>) {
    if !visited.insert(node.id()) {
        return;
    }
    for (key, property) in node.properties() {
        let Slot::Data(value) = property.slot() else {
            continue;
        };
        match value {
            Value::Deferred(deferred) => {
                pending.push((Site::Key(node.clone(), key), deferred.clone()));
            }
            Value::Node(child) => collect_node(child, pending, visited),
            Value::List(list) => collect_list(list, pending, visited),
            _ => {}
        }
    }
}

fn collect_list(list: &List, pending: &mut Vec<(Site, Deferred)>, visited: &mut HashSet<usize>) {
    if !visited.insert(list.id()) {
        return;
    }
    for (index, item) in list.items().into_iter().enumerate() {
        match item {
            Value::Deferred(deferred) => pending.push((Site::Index(list.clone(), index), deferred)),
            Value::Node(child) => collect_node(&child, pending, visited),
            Value::List(inner) => collect_list(&inner, pending, visited),
            _ => {}
        }
    }
}

/// True when any deferred value is still reachable from `root`.
pub fn has_deferred(root: &Node) -> bool {
    let mut pending = Vec::new();
    collect_node(root, &mut pending, &mut HashSet::new());
    !pending.is_empty()
}
