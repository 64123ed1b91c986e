//! Structural equality

use super::DEFAULT_MAX_DEPTH;
use crate::domain::value_objects::Value;

/// Structural equality with the default depth.
pub fn equals_deep(a: &Value, b: &Value) -> bool {
    equals_deep_with_depth(a, b, DEFAULT_MAX_DEPTH)
}

/// Structural equality: same key sets and recursively equal values.
///
/// Returns `false` once the depth is exhausted: a comparison that cannot be
/// finished counts as unequal. Integers and floats compare numerically.
pub fn equals_deep_with_depth(a: &Value, b: &Value, depth: usize) -> bool {
    match (a, b) {
        (Value::Node(x), Value::Node(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let Some(next) = depth.checked_sub(1) else {
                return false;
            };
            if x.keys() != y.keys() {
                return false;
            }
            x.entries().iter().all(|(key, left)| match y.get(key) {
                Some(right) => equals_deep_with_depth(left, &right, next),
                None => false,
            })
        }
        (Value::List(x), Value::List(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let Some(next) = depth.checked_sub(1) else {
                return false;
            };
            let (left, right) = (x.items(), y.items());
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right.iter())
                    .all(|(l, r)| equals_deep_with_depth(l, r, next))
        }
        (Value::Deferred(x), Value::Deferred(y)) => {
            if !x.same_resolver(y) {
                return false;
            }
            match (x.original(), y.original()) {
                (None, None) => true,
                (Some(l), Some(r)) => depth
                    .checked_sub(1)
                    .is_some_and(|next| equals_deep_with_depth(l, r, next)),
                _ => false,
            }
        }
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Integer(i), Value::Float(f)) | (Value::Float(f), Value::Integer(i)) => {
            *i as f64 == *f
        }
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bytes(x), Value::Bytes(y)) => x == y,
        (Value::Date(x), Value::Date(y)) => x == y,
        (Value::Regex(x), Value::Regex(y)) => x == y,
        _ => false,
    }
}
