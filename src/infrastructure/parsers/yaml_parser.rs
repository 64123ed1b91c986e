//! YAML source parsing.
//!
//! Mapping keys that are not strings are stringified; tags are ignored and
//! the tagged value is used as is.

use serde_yaml_ng::Value as Yaml;

use crate::domain::value_objects::{Node, Value};

/// Parse a YAML document into a configuration node.
///
/// Returns `None` for a top level that is not a mapping.
pub fn from_yaml(text: &str) -> Result<Option<Node>, serde_yaml_ng::Error> {
    match parse_value(text)? {
        Value::Node(node) => Ok(Some(node)),
        Value::Null => Ok(Some(Node::new())),
        _ => Ok(None),
    }
}

pub(super) fn parse_value(text: &str) -> Result<Value, serde_yaml_ng::Error> {
    let yaml: Yaml = serde_yaml_ng::from_str(text)?;
    Ok(convert(yaml))
}

fn convert(yaml: Yaml) -> Value {
    match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::from(items.into_iter().map(convert).collect::<Vec<_>>()),
        Yaml::Mapping(map) => Value::Node(
            map.into_iter()
                .map(|(k, v)| (key_text(k), convert(v)))
                .collect::<Node>(),
        ),
        Yaml::Tagged(tagged) => convert(tagged.value),
    }
}

fn key_text(key: Yaml) -> String {
    match key {
        Yaml::String(s) => s,
        Yaml::Null => "null".to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::Tagged(tagged) => key_text(tagged.value),
        other => serde_yaml_ng::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
