//! JSON conversion in both directions.
//!
//! `to_json` is the export used by `Config::to_object`: dates become RFC 3339
//! strings, patterns become `{}`, bytes become arrays of numbers. Deferred
//! values are dropped from objects and become `null` inside arrays. A
//! reference back to an enclosing container is exported as `null`.

use serde_json::{Map, Number, Value as Json};

use crate::domain::value_objects::{Node, Value};

/// Convert parsed JSON into a configuration value.
pub fn from_json(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Value::String(s.clone()),
        Json::Array(items) => Value::from(items.iter().map(from_json).collect::<Vec<_>>()),
        Json::Object(map) => Value::Node(
            map.iter()
                .map(|(k, v)| (k.clone(), from_json(v)))
                .collect::<Node>(),
        ),
    }
}

/// Export a configuration value as plain JSON.
pub fn to_json(value: &Value) -> Json {
    Exporter::default().export(value)
}

#[derive(Default)]
struct Exporter {
    ancestors: Vec<usize>,
}

impl Exporter {
    fn export(&mut self, value: &Value) -> Json {
        match value {
            Value::Null | Value::Deferred(_) => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Integer(i) => Json::Number((*i).into()),
            Value::Float(f) => Number::from_f64(*f).map(Json::Number).unwrap_or(Json::Null),
            Value::String(s) => Json::String(s.clone()),
            Value::Bytes(bytes) => Json::Array(bytes.iter().map(|b| Json::Number((*b).into())).collect()),
            Value::Date(date) => Json::String(date.to_rfc3339()),
            Value::Regex(_) => Json::Object(Map::new()),
            Value::List(list) => self.nested(list.id(), |this| {
                Json::Array(list.items().iter().map(|item| this.export(item)).collect())
            }),
            Value::Node(node) => self.nested(node.id(), |this| {
                let mut map = Map::new();
                for (key, child) in node.entries() {
                    if child.is_deferred() {
                        continue;
                    }
                    map.insert(key, this.export(&child));
                }
                Json::Object(map)
            }),
        }
    }

    fn nested(&mut self, id: usize, body: impl FnOnce(&mut Self) -> Json) -> Json {
        if self.ancestors.contains(&id) {
            tracing::warn!("circular reference in configuration exported as null");
            return Json::Null;
        }
        self.ancestors.push(id);
        let out = body(self);
        self.ancestors.pop();
        out
    }
}
