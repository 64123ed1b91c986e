//! Path traversal over configuration trees.
//!
//! Segments address node keys; a segment that parses as an index addresses a
//! list element.

use crate::domain::value_objects::{Node, Value};
use crate::error::{ConfigError, ConfigResult};

/// Value at `segments` below `root`. An empty path yields the root itself.
pub fn lookup(root: &Node, segments: &[String]) -> Option<Value> {
    let mut current = Value::Node(root.clone());
    for segment in segments {
        current = step(&current, segment)?;
    }
    Some(current)
}

fn step(current: &Value, segment: &str) -> Option<Value> {
    match current {
        Value::Node(node) => node.get(segment),
        Value::List(list) => segment.parse::<usize>().ok().and_then(|i| list.get(i)),
        _ => None,
    }
}

/// Assign `value` at `segments`, creating intermediate nodes as needed.
///
/// Existing non-container values on the way are replaced by fresh nodes.
/// Fails with `Immutable` when any write along the path is rejected; a new
/// intermediate node is only attached to a parent that accepted it, so a
/// rejected write leaves the tree unchanged.
pub fn set_path(root: &Node, segments: &[String], value: Value) -> ConfigResult<()> {
    let Some((last, parents)) = segments.split_last() else {
        return Err(ConfigError::not_defined(""));
    };

    let mut current = Value::Node(root.clone());
    for segment in parents {
        let next = match step(&current, segment) {
            Some(child @ (Value::Node(_) | Value::List(_))) => child,
            _ => {
                let fresh = Value::Node(Node::new());
                assign(&current, segment, fresh.clone())?;
                fresh
            }
        };
        current = next;
    }
    assign(&current, last, value)
}

fn assign(container: &Value, segment: &str, value: Value) -> ConfigResult<()> {
    match container {
        Value::Node(node) => node.set(segment, value),
        Value::List(list) => match segment.parse::<usize>() {
            Ok(index) if index == list.len() => list.push(value),
            Ok(index) => list.set(index, value),
            Err(_) => Err(ConfigError::not_defined(segment)),
        },
        _ => Err(ConfigError::not_defined(segment)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::KeyPath;

    fn root() -> Node {
        Node::new().with(
            "servers",
            vec![Value::from(Node::new().with("host", "a")), Value::from(Node::new().with("host", "b"))],
        )
    }

    #[test]
    fn numeric_segments_index_lists() {
        let host = lookup(&root(), &"servers.1.host".segments()).unwrap();
        assert_eq!(host.as_str(), Some("b"));
        assert!(lookup(&root(), &"servers.9.host".segments()).is_none());
    }

    #[test]
    fn empty_path_is_the_root() {
        let r = root();
        let found = lookup(&r, &[]).unwrap();
        assert!(found.as_node().unwrap().ptr_eq(&r));
    }

    #[test]
    fn set_path_creates_intermediate_nodes() {
        let r = Node::new();
        set_path(&r, &"a.b.c".segments(), Value::from(1)).unwrap();
        assert_eq!(lookup(&r, &"a.b.c".segments()).unwrap().as_i64(), Some(1));
    }

    #[test]
    fn set_path_replaces_scalars_on_the_way() {
        let r = Node::new().with("a", 1);
        set_path(&r, &"a.b".segments(), Value::from(2)).unwrap();
        assert_eq!(lookup(&r, &"a.b".segments()).unwrap().as_i64(), Some(2));
    }

    #[test]
    fn set_path_appends_to_lists() {
        let r = root();
        set_path(&r, &"servers.2".segments(), Value::from("c")).unwrap();
        assert_eq!(lookup(&r, &"servers.2".segments()).unwrap().as_str(), Some("c"));
    }
}
