//! TOML source parsing.

use chrono::DateTime;

use crate::domain::value_objects::{Node, Value};

/// Parse a TOML document into a configuration value.
pub fn from_toml(text: &str) -> Result<Node, toml::de::Error> {
    let table: toml::Table = toml::from_str(text)?;
    Ok(convert_table(table))
}

/// Parse TOML text that may be a bare value rather than a document
/// (`"[1, 2]"`, `"true"`). Documents are tried first.
pub(super) fn parse_value(text: &str) -> Result<Value, toml::de::Error> {
    match from_toml(text) {
        Ok(node) => Ok(Value::Node(node)),
        Err(doc_err) => match toml::from_str::<toml::Table>(&format!("value = {text}")) {
            Ok(mut wrapped) => Ok(wrapped.remove("value").map(convert).unwrap_or_default()),
            Err(_) => Err(doc_err),
        },
    }
}

fn convert_table(table: toml::Table) -> Node {
    table.into_iter().map(|(k, v)| (k, convert(v))).collect()
}

fn convert(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Integer(i),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        // Offset date-times become dates; local dates and times stay text.
        toml::Value::Datetime(dt) => {
            let text = dt.to_string();
            match DateTime::parse_from_rfc3339(&text) {
                Ok(date) => Value::Date(date),
                Err(_) => Value::String(text),
            }
        }
        toml::Value::Array(items) => Value::from(items.into_iter().map(convert).collect::<Vec<_>>()),
        toml::Value::Table(table) => Value::Node(convert_table(table)),
    }
}
