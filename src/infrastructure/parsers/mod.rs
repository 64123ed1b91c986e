//! Source format parsers
//!
//! Each parser turns source text into a configuration `Node`. Whitespace-only
//! text is an empty node; a top level that is not a table/object is rejected.

mod json_parser;
mod toml_parser;
mod yaml_parser;

pub use json_parser::{from_json, to_json};
pub use toml_parser::from_toml;
pub use yaml_parser::from_yaml;

use crate::domain::value_objects::{Node, Value};
use crate::error::{ConfigError, ConfigResult};

/// File extensions, in the order they are tried for each base name.
pub const EXTENSIONS: [&str; 4] = ["json", "toml", "yaml", "yml"];

/// A supported source format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
    Yaml,
}

impl Format {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Format named by a path's extension.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Parse `text` into a value of any shape (used for override values).
    pub fn parse_value(self, source_name: &str, text: &str) -> ConfigResult<Value> {
        match self {
            Self::Json => serde_json::from_str::<serde_json::Value>(text)
                .map(|v| from_json(&v))
                .map_err(|e| ConfigError::malformed(source_name, e)),
            Self::Toml => toml_parser::parse_value(text).map_err(|e| ConfigError::malformed(source_name, e)),
            Self::Yaml => yaml_parser::parse_value(text).map_err(|e| ConfigError::malformed(source_name, e)),
        }
    }

    /// Parse `text` as a configuration document.
    pub fn parse(self, source_name: &str, text: &str) -> ConfigResult<Node> {
        if text.trim().is_empty() {
            return Ok(Node::new());
        }
        match self.parse_value(source_name, text)? {
            Value::Node(node) => Ok(node),
            Value::Null => Ok(Node::new()),
            other => Err(ConfigError::malformed(
                source_name,
                format!("top-level value must be a table, found {}", other.kind()),
            )),
        }
    }
}
