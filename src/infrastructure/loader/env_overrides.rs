//! Sources derived from the environment rather than config directories:
//! the custom environment variable mapping and the JSON overrides.

use crate::config::LoadOptions;
use crate::domain::value_objects::{ConfigWarning, Node, Value, WarningKind};
use crate::infrastructure::parsers::Format;

/// Source name of the `STRATA_CONFIG` environment override.
pub const ENV_OVERRIDE_SOURCE: &str = "$STRATA_CONFIG";
/// Source name of the `--STRATA_CONFIG` argument override.
pub const ARG_OVERRIDE_SOURCE: &str = "--STRATA_CONFIG argument";

const NAME_KEY: &str = "__name";
const FORMAT_KEY: &str = "__format";

/// Replace each variable name in `mapping` with that variable's value.
///
/// Leaf strings name a variable. A node holding `__name` (and optionally
/// `__format`) names a variable whose value is parsed in that format.
/// Unset and empty variables contribute nothing; a value that fails to
/// parse is reported and skipped.
pub fn substitute_env_vars(
    mapping: &Node,
    options: &LoadOptions,
    warnings: &mut Vec<ConfigWarning>,
) -> Node {
    let out = Node::new();
    for (key, entry) in mapping.entries() {
        let resolved = match &entry {
            Value::String(var) => options
                .var(var)
                .filter(|v| !v.is_empty())
                .map(|v| Value::String(v.to_string())),
            Value::Node(node) if node.contains_key(NAME_KEY) => typed_var(node, options, warnings),
            Value::Node(node) => {
                let nested = substitute_env_vars(node, options, warnings);
                (!nested.is_empty()).then(|| Value::Node(nested))
            }
            other => {
                tracing::debug!(key = %key, kind = other.kind(), "ignoring non-string entry in environment mapping");
                None
            }
        };
        if let Some(value) = resolved {
            // `out` is fresh; insertion cannot fail.
            let _ = out.set(key, value);
        }
    }
    out
}

fn typed_var(spec: &Node, options: &LoadOptions, warnings: &mut Vec<ConfigWarning>) -> Option<Value> {
    let var = spec.get(NAME_KEY)?;
    let var = var.as_str()?;
    let raw = options.var(var).filter(|v| !v.is_empty())?;

    let Some(format_name) = spec.get(FORMAT_KEY) else {
        return Some(Value::String(raw.to_string()));
    };
    let format_name = format_name.as_str().unwrap_or_default();
    let Some(format) = Format::from_extension(format_name) else {
        warnings.push(skipped(var, format!("unsupported __format '{format_name}' for {var}")));
        return None;
    };
    match format.parse_value(var, raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warnings.push(skipped(var, err.to_string()));
            None
        }
    }
}

/// Parse a JSON override. Anything that is not a JSON object is reported
/// and yields `None`.
pub fn parse_override(source_name: &str, text: &str, warnings: &mut Vec<ConfigWarning>) -> Option<Node> {
    match Format::Json.parse_value(source_name, text) {
        Ok(Value::Node(node)) => Some(node),
        Ok(other) => {
            warnings.push(skipped(
                source_name,
                format!("{source_name} must be a JSON object, found {}", other.kind()),
            ));
            None
        }
        Err(err) => {
            warnings.push(skipped(source_name, err.to_string()));
            None
        }
    }
}

fn skipped(source: &str, message: String) -> ConfigWarning {
    let warning = ConfigWarning::new(WarningKind::MalformedOverride, message).with_source(source);
    tracing::warn!(source = source, "{warning}; ignoring");
    warning
}
