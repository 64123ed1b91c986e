//! Deep clone
//!
//! Copies a value graph. Previously visited nodes and lists map to the copy
//! already made for them, so shared references stay shared and cycles stay
//! cycles (pointing into the copy, never back at the original).

use std::collections::HashMap;

use super::DEFAULT_MAX_DEPTH;
use crate::domain::value_objects::{List, Node, Property, Slot, Value};

/// Deep-copy `value` with the default depth and cycle preservation.
pub fn clone_deep(value: &Value) -> Value {
    clone_deep_with(value, DEFAULT_MAX_DEPTH, true)
}

/// Deep-copy a node; convenience wrapper around [`clone_deep`].
pub fn clone_node(node: &Node) -> Node {
    let mut cloner = Cloner {
        seen: HashMap::new(),
        preserve_cycles: true,
    };
    cloner.clone_node(node, DEFAULT_MAX_DEPTH)
}

/// Deep-copy `value`.
///
/// At depth 0 the value is returned as-is (a shared handle for containers).
/// With `preserve_cycles` off, shared subgraphs are duplicated and cycles are
/// unrolled until the depth runs out.
pub fn clone_deep_with(value: &Value, depth: usize, preserve_cycles: bool) -> Value {
    let mut cloner = Cloner {
        seen: HashMap::new(),
        preserve_cycles,
    };
    cloner.clone_value(value, depth)
}

struct Cloner {
    /// source identity -> copy
    seen: HashMap<usize, Value>,
    preserve_cycles: bool,
}

impl Cloner {
    fn clone_value(&mut self, value: &Value, depth: usize) -> Value {
        if depth == 0 {
            return value.clone();
        }
        match value {
            Value::Node(node) => Value::Node(self.clone_node(node, depth)),
            Value::List(list) => self.clone_list(list, depth),
            Value::Deferred(deferred) => {
                let original = deferred
                    .original()
                    .map(|o| self.clone_value(o, depth - 1));
                Value::Deferred(deferred.clone().with_original(original))
            }
            Value::Bytes(bytes) => Value::Bytes(bytes.clone()),
            // Scalars, dates and patterns are plain values in this model.
            other => other.clone(),
        }
    }

    fn clone_node(&mut self, node: &Node, depth: usize) -> Node {
        if let Some(Value::Node(copy)) = self.visited(node.id()) {
            return copy;
        }
        let copy = Node::new();
        self.remember(node.id(), Value::Node(copy.clone()));

        for (key, property) in node.properties() {
            let property = match property.slot() {
                // Getters are carried over verbatim, never invoked.
                Slot::Accessor(_) => property.clone(),
                Slot::Data(v) => Property::data(self.clone_value(v, depth - 1)),
            };
            // `copy` is fresh and extensible; definition cannot fail.
            let _ = copy.define(key, property);
        }
        copy
    }

    fn clone_list(&mut self, list: &List, depth: usize) -> Value {
        if let Some(copy) = self.visited(list.id()) {
            return copy;
        }
        let copy = List::new();
        self.remember(list.id(), Value::List(copy.clone()));

        for item in list.items() {
            let _ = copy.push(self.clone_value(&item, depth - 1));
        }
        Value::List(copy)
    }

    fn visited(&self, id: usize) -> Option<Value> {
        if !self.preserve_cycles {
            return None;
        }
        self.seen.get(&id).cloned()
    }

    fn remember(&mut self, id: usize, copy: Value) {
        if self.preserve_cycles {
            self.seen.insert(id, copy);
        }
    }
}
