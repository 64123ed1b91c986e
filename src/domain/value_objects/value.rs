//! Configuration Value Model
//!
//! `Value` is the tagged union every configuration source is parsed into.
//! Structural values (`Node`, `List`) are shared handles so that graphs with
//! shared or cyclic references can be represented and copied faithfully.
//!
//! A `Node` stores `Property` records rather than bare values. Each record
//! carries `writable`/`configurable` flags and the node carries an
//! `extensible` flag; together they are what freezing flips. Every mutation
//! goes through a checked method that validates the write before applying it.
//!
//! Handles are `Send + Sync`, so a frozen tree can be shared across threads.
//! No lock is held while an accessor runs or while another handle is locked.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, FixedOffset};

use super::{Deferred, Pattern};
use crate::error::{ConfigError, ConfigResult};

/// Nesting depth printed by `Debug` before eliding.
const DEBUG_DEPTH: usize = 8;

/// A configuration value.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Date(DateTime<FixedOffset>),
    Regex(Pattern),
    List(List),
    Node(Node),
    /// Placeholder computed from the fully merged configuration.
    Deferred(Deferred),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Date(_) => "date",
            Value::Regex(_) => "regex",
            Value::List(_) => "list",
            Value::Node(_) => "node",
            Value::Deferred(_) => "deferred",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Value::Deferred(_))
    }

    /// True for values that hold other values (`Node` and `List`).
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Node(_) | Value::List(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_regex(&self) -> Option<&Pattern> {
        match self {
            Value::Regex(p) => Some(p),
            _ => None,
        }
    }

    fn fmt_bounded(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Integer(i) => write!(f, "Integer({i})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Bytes(b) => write!(f, "Bytes({b:?})"),
            Value::Date(d) => write!(f, "Date({})", d.to_rfc3339()),
            Value::Regex(p) => write!(f, "Regex({p})"),
            Value::List(l) => l.fmt_bounded(f, depth),
            Value::Node(n) => n.fmt_bounded(f, depth),
            Value::Deferred(d) => fmt::Debug::fmt(d, f),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_bounded(f, DEBUG_DEPTH)
    }
}

/// Structural equality, see [`crate::domain::services::equals_deep`].
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::domain::services::equals_deep(self, other)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(d: DateTime<FixedOffset>) -> Self {
        Value::Date(d)
    }
}

impl From<Pattern> for Value {
    fn from(p: Pattern) -> Self {
        Value::Regex(p)
    }
}

impl From<Node> for Value {
    fn from(n: Node) -> Self {
        Value::Node(n)
    }
}

impl From<List> for Value {
    fn from(l: List) -> Self {
        Value::List(l)
    }
}

impl From<Deferred> for Value {
    fn from(d: Deferred) -> Self {
        Value::Deferred(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(List::from(items))
    }
}

/// A computed property. The getter is evaluated on every read and copied
/// verbatim (never flattened) by merge and clone.
#[derive(Clone)]
pub struct Accessor(Arc<dyn Fn() -> Value + Send + Sync>);

impl Accessor {
    pub fn new<F>(getter: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(getter))
    }

    pub fn get(&self) -> Value {
        (self.0)()
    }

    pub fn ptr_eq(&self, other: &Accessor) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Accessor(..)")
    }
}

/// What a property holds.
#[derive(Clone, Debug)]
pub enum Slot {
    Data(Value),
    Accessor(Accessor),
}

/// A keyed entry in a `Node` together with its mutability flags.
#[derive(Clone, Debug)]
pub struct Property {
    slot: Slot,
    writable: bool,
    configurable: bool,
}

impl Property {
    pub fn data(value: Value) -> Self {
        Self {
            slot: Slot::Data(value),
            writable: true,
            configurable: true,
        }
    }

    pub fn accessor(accessor: Accessor) -> Self {
        Self {
            slot: Slot::Accessor(accessor),
            writable: true,
            configurable: true,
        }
    }

    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    /// Current value; accessors are evaluated.
    pub fn value(&self) -> Value {
        match &self.slot {
            Slot::Data(v) => v.clone(),
            Slot::Accessor(a) => a.get(),
        }
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    pub fn is_configurable(&self) -> bool {
        self.configurable
    }

    pub fn is_accessor(&self) -> bool {
        matches!(self.slot, Slot::Accessor(_))
    }

    pub(crate) fn seal(&mut self) {
        self.writable = false;
        self.configurable = false;
    }
}

struct NodeInner {
    props: BTreeMap<String, Property>,
    extensible: bool,
}

/// A mapping from key to property. Keys iterate in lexicographic order.
#[derive(Clone)]
pub struct Node(Arc<RwLock<NodeInner>>);

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    pub fn new() -> Self {
        Self(Arc::new(RwLock::new(NodeInner {
            props: BTreeMap::new(),
            extensible: true,
        })))
    }

    // A panic mid-write never leaves a half-applied property, so a
    // poisoned lock still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, NodeInner> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, NodeInner> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Builder-style insert for fresh nodes. Has no effect on frozen nodes.
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let _ = self.set(key, value);
        self
    }

    /// Identity of the underlying allocation.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn len(&self) -> usize {
        self.read().props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().props.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.read().props.contains_key(key)
    }

    /// Keys in lexicographic order.
    pub fn keys(&self) -> Vec<String> {
        self.read().props.keys().cloned().collect()
    }

    /// Value at `key`, evaluating accessors.
    pub fn get(&self, key: &str) -> Option<Value> {
        let property = self.property(key)?;
        Some(property.value())
    }

    pub fn property(&self, key: &str) -> Option<Property> {
        self.read().props.get(key).cloned()
    }

    /// Snapshot of all properties in key order.
    pub fn properties(&self) -> Vec<(String, Property)> {
        self.read()
            .props
            .iter()
            .map(|(k, p)| (k.clone(), p.clone()))
            .collect()
    }

    /// Snapshot of all values in key order, evaluating accessors.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.properties()
            .into_iter()
            .map(|(k, p)| {
                let v = p.value();
                (k, v)
            })
            .collect()
    }

    /// Assign a data value.
    ///
    /// Fails without touching the node when the property is frozen, or when
    /// the key is new and the node no longer accepts keys.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> ConfigResult<()> {
        let key = key.into();
        let mut inner = self.write();
        let extensible = inner.extensible;
        match inner.props.get_mut(&key) {
            Some(existing) => {
                let allowed = match existing.slot {
                    Slot::Data(_) => existing.writable,
                    Slot::Accessor(_) => existing.configurable,
                };
                if !allowed {
                    return Err(ConfigError::immutable("update", key));
                }
                if existing.is_accessor() {
                    *existing = Property::data(value.into());
                } else {
                    existing.slot = Slot::Data(value.into());
                }
                Ok(())
            }
            None if extensible => {
                inner.props.insert(key, Property::data(value.into()));
                Ok(())
            }
            None => Err(ConfigError::immutable("add", key)),
        }
    }

    /// Install a property record verbatim, replacing any configurable one.
    pub fn define(&self, key: impl Into<String>, property: Property) -> ConfigResult<()> {
        let key = key.into();
        let mut inner = self.write();
        match inner.props.get(&key) {
            Some(existing) if !existing.configurable => {
                return Err(ConfigError::immutable("redefine", key));
            }
            None if !inner.extensible => return Err(ConfigError::immutable("add", key)),
            _ => {}
        }
        inner.props.insert(key, property);
        Ok(())
    }

    pub fn remove(&self, key: &str) -> ConfigResult<Option<Value>> {
        let removed = {
            let mut inner = self.write();
            match inner.props.get(key) {
                None => return Ok(None),
                Some(existing) if !existing.configurable => {
                    return Err(ConfigError::immutable("delete", key))
                }
                Some(_) => inner.props.remove(key),
            }
        };
        Ok(removed.map(|p| p.value()))
    }

    pub fn is_extensible(&self) -> bool {
        self.read().extensible
    }

    /// True once the node rejects new keys and every property is sealed.
    pub fn is_frozen(&self) -> bool {
        let inner = self.read();
        !inner.extensible
            && inner
                .props
                .values()
                .all(|p| !p.writable && !p.configurable)
    }

    pub(crate) fn prevent_extensions(&self) {
        self.write().extensible = false;
    }

    /// Make one property non-writable and non-configurable. Idempotent.
    pub(crate) fn seal_property(&self, key: &str) {
        if let Some(p) = self.write().props.get_mut(key) {
            p.seal();
        }
    }

    /// Add a key that does not exist yet, even when the node is no longer
    /// extensible. Used only for module defaults, which never replace values.
    pub(crate) fn insert_missing(&self, key: impl Into<String>, property: Property) -> bool {
        let key = key.into();
        let mut inner = self.write();
        if inner.props.contains_key(&key) {
            return false;
        }
        inner.props.insert(key, property);
        true
    }

    fn fmt_bounded(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        if depth == 0 {
            return write!(f, "Node {{ .. {} keys }}", self.len());
        }
        let entries = self.properties();
        let mut map = f.debug_map();
        for (key, property) in &entries {
            match property.slot() {
                Slot::Data(value) => map.entry(key, &Bounded(value, depth - 1)),
                Slot::Accessor(a) => map.entry(key, a),
            };
        }
        map.finish()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_bounded(f, DEBUG_DEPTH)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let node = Node::new();
        for (k, v) in iter {
            let _ = node.set(k, v);
        }
        node
    }
}

struct ListInner {
    items: Vec<Value>,
    frozen: bool,
}

/// An ordered sequence of values.
#[derive(Clone)]
pub struct List(Arc<RwLock<ListInner>>);

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Value>> for List {
    fn from(items: Vec<Value>) -> Self {
        Self(Arc::new(RwLock::new(ListInner {
            items,
            frozen: false,
        })))
    }
}

impl List {
    pub fn new() -> Self {
        Self::from(Vec::new())
    }

    fn read(&self) -> RwLockReadGuard<'_, ListInner> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ListInner> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &List) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.read().items.get(index).cloned()
    }

    /// Snapshot of the items.
    pub fn items(&self) -> Vec<Value> {
        self.read().items.clone()
    }

    pub fn push(&self, value: impl Into<Value>) -> ConfigResult<()> {
        let mut inner = self.write();
        if inner.frozen {
            return Err(ConfigError::immutable("add", inner.items.len().to_string()));
        }
        inner.items.push(value.into());
        Ok(())
    }

    pub fn set(&self, index: usize, value: impl Into<Value>) -> ConfigResult<()> {
        let mut inner = self.write();
        if inner.frozen {
            return Err(ConfigError::immutable("update", index.to_string()));
        }
        match inner.items.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(ConfigError::not_defined(index.to_string())),
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.read().frozen
    }

    pub(crate) fn freeze(&self) {
        self.write().frozen = true;
    }

    fn fmt_bounded(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        if depth == 0 {
            return write!(f, "[.. {} items]", self.len());
        }
        let items = self.items();
        f.debug_list()
            .entries(items.iter().map(|v| Bounded(v, depth - 1)))
            .finish()
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_bounded(f, DEBUG_DEPTH)
    }
}

struct Bounded<'a>(&'a Value, usize);

impl fmt::Debug for Bounded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_bounded(f, self.1)
    }
}
