//! Differ Domain Service
//!
//! Computes the additive delta between two configuration trees: the smallest
//! node that, deep-merged onto `base`, reproduces every changed leaf of
//! `changed`. Keys missing from `changed` are not reported; the delta never
//! expresses removal.

use super::{clone_deep, equals_deep, DEFAULT_MAX_DEPTH};
use crate::domain::value_objects::{Node, Value};

/// Diff with the default depth.
pub fn diff_deep(base: &Node, changed: &Node) -> Node {
    diff_deep_with_depth(base, changed, DEFAULT_MAX_DEPTH)
}

/// Diff with an explicit depth; past the budget a changed branch is
/// reported as an empty node.
pub fn diff_deep_with_depth(base: &Node, changed: &Node, depth: usize) -> Node {
    let diff = Node::new();
    for (key, next) in changed.entries() {
        let previous = base.get(&key);
        let delta = match (&previous, &next) {
            (Some(Value::Node(before)), Value::Node(after)) => {
                if equals_deep(&Value::Node(before.clone()), &next) {
                    continue;
                }
                let nested = match depth.checked_sub(1) {
                    Some(d) => diff_deep_with_depth(before, after, d),
                    None => Node::new(),
                };
                Value::Node(nested)
            }
            (Some(before), after) if equals_deep(before, after) => continue,
            (_, after) => clone_deep(after),
        };
        // `diff` is fresh; insertion cannot fail.
        let _ = diff.set(key, delta);
    }
    diff
}
