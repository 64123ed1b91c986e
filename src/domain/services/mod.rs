//! Domain Services
//!
//! Pure operations over the configuration value model: merging, copying,
//! comparing, diffing, resolving deferred values and freezing. None of them
//! touch the file system.

mod cloner;
mod differ;
mod equality;
mod freezer;
mod merger;
mod paths;
mod precedence;
mod resolver;
mod strictness;

/// Recursion budget shared by merge, clone, equality and diff.
pub const DEFAULT_MAX_DEPTH: usize = 20;

pub use cloner::{clone_deep, clone_deep_with, clone_node};
pub use differ::{diff_deep, diff_deep_with_depth};
pub use equality::{equals_deep, equals_deep_with_depth};
pub use freezer::{make_immutable, make_immutable_keys};
pub(crate) use merger::fill_missing;
pub use merger::{extend_deep, extend_deep_with_depth};
pub use paths::{lookup, set_path};
pub use precedence::{base_names, resolution_order, Discriminators};
pub use resolver::{has_deferred, resolve_deferred};
pub use strictness::{run_strictness_checks, IMPLICIT_ENVIRONMENT};

use crate::domain::value_objects::Value;

/// True only for structural nodes; lists, dates, patterns and deferred
/// values are not objects in the merge sense.
pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Node(_))
}
