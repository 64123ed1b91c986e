//! Deferred Value Object
//!
//! A placeholder whose content is computed from the fully merged
//! configuration. Sources create it when a value depends on other keys; the
//! resolution pass replaces it exactly once after the last layer is merged.

use std::fmt;
use std::sync::Arc;

use super::{Node, Value};

type ResolveFn = dyn Fn(&Node, Option<&Value>) -> Value + Send + Sync;

/// Deferred configuration value.
///
/// The resolver receives the merged root and the `original` value: whatever
/// this placeholder overrode when it was merged in. When one deferred value
/// is layered over another, the newer one inherits the older one's
/// `original`, so the chain always points at the last concrete value.
#[derive(Clone)]
pub struct Deferred {
    resolver: Arc<ResolveFn>,
    original: Option<Box<Value>>,
}

impl Deferred {
    pub fn new<F>(resolver: F) -> Self
    where
        F: Fn(&Node, Option<&Value>) -> Value + Send + Sync + 'static,
    {
        Self {
            resolver: Arc::new(resolver),
            original: None,
        }
    }

    pub fn original(&self) -> Option<&Value> {
        self.original.as_deref()
    }

    pub(crate) fn with_original(mut self, original: Option<Value>) -> Self {
        self.original = original.map(Box::new);
        self
    }

    /// Evaluate against the merged root.
    pub fn resolve(&self, root: &Node) -> Value {
        (self.resolver)(root, self.original())
    }

    /// Whether two placeholders share the same resolver.
    pub fn same_resolver(&self, other: &Deferred) -> bool {
        Arc::ptr_eq(&self.resolver, &other.resolver)
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("original", &self.original)
            .finish_non_exhaustive()
    }
}

/// Wrap a resolver as a deferred configuration value.
///
/// ```
/// use strata::{defer, Node, Value};
///
/// let url = defer(|root, _original| {
///     let host = root
///         .get("host")
///         .and_then(|v| v.as_str().map(str::to_string))
///         .unwrap_or_default();
///     Value::from(format!("https://{host}"))
/// });
/// let root = Node::new().with("host", "example.com");
/// if let Value::Deferred(d) = &url {
///     assert_eq!(d.resolve(&root).as_str(), Some("https://example.com"));
/// }
/// ```
pub fn defer<F>(resolver: F) -> Value
where
    F: Fn(&Node, Option<&Value>) -> Value + Send + Sync + 'static,
{
    Value::Deferred(Deferred::new(resolver))
}
