//! Shared generators for configuration trees.

use proptest::prelude::*;
use serde_json::Value as Json;
use strata::infrastructure::parsers::from_json;
use strata::{Node, Value};

fn leaf() -> impl Strategy<Value = Json> {
    prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::Bool),
        any::<i64>().prop_map(Json::from),
        "[a-z]{0,6}".prop_map(Json::String),
    ]
}

fn tree() -> impl Strategy<Value = Json> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Json::Array),
            prop::collection::btree_map("[a-e]", inner, 0..4)
                .prop_map(|m| Json::Object(m.into_iter().collect())),
        ]
    })
}

/// Random configuration node with keys drawn from a small alphabet, so
/// independently generated nodes overlap.
pub fn node() -> impl Strategy<Value = Node> {
    prop::collection::btree_map("[a-e]", tree(), 0..5).prop_map(|m| {
        match from_json(&Json::Object(m.into_iter().collect())) {
            Value::Node(node) => node,
            _ => Node::new(),
        }
    })
}
