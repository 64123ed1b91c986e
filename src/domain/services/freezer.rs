//! Immutability enforcer
//!
//! Freezing seals every property (non-writable, non-configurable) and stops
//! nodes from accepting new keys. It is monotonic and idempotent. Properties
//! that still hold a deferred value are left writable so resolution can
//! replace them; callers are expected to resolve before freezing.

use std::collections::HashSet;

use super::equals_deep;
use crate::domain::value_objects::{List, Node, Slot, Value};
use crate::error::{ConfigError, ConfigResult};

/// Recursively freeze `node` and everything reachable from it.
pub fn make_immutable(node: &Node) -> Node {
    let mut seen = HashSet::new();
    freeze_node(node, &mut seen);
    node.clone()
}

fn freeze_node(node: &Node, seen: &mut HashSet<usize>) {
    if !seen.insert(node.id()) {
        return;
    }
    for (key, property) in node.properties() {
        match property.slot() {
            Slot::Data(Value::Deferred(_)) => continue,
            Slot::Data(Value::Node(child)) => freeze_node(child, seen),
            Slot::Data(Value::List(list)) => freeze_list(list, seen),
            _ => {}
        }
        node.seal_property(&key);
    }
    node.prevent_extensions();
}

fn freeze_list(list: &List, seen: &mut HashSet<usize>) {
    if !seen.insert(list.id()) {
        return;
    }
    let items = list.items();
    for item in &items {
        match item {
            Value::Node(child) => freeze_node(child, seen),
            Value::List(inner) => freeze_list(inner, seen),
            _ => {}
        }
    }
    if !items.iter().any(Value::is_deferred) {
        list.freeze();
    }
}

/// Legacy form: optionally assign `values[i]` to `keys[i]`, then seal each
/// listed key. Does not recurse.
///
/// Re-sealing a frozen key with an equal value is a no-op; assigning a
/// different value to a frozen key fails.
pub fn make_immutable_keys(node: &Node, keys: &[&str], values: &[Value]) -> ConfigResult<Node> {
    for (index, key) in keys.iter().enumerate() {
        if let Some(value) = values.get(index) {
            let unchanged = node.get(key).is_some_and(|current| equals_deep(&current, value));
            if !unchanged {
                node.set(*key, value.clone())?;
            }
        } else if !node.contains_key(key) {
            return Err(ConfigError::not_defined(*key));
        }
        node.seal_property(key);
    }
    Ok(node.clone())
}
