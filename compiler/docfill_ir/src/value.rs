//! Runtime values.
//!
//! `Value` is cheap to clone: every heap payload sits behind an `Arc`, so
//! values can be bound into many child scopes and shared across threads.

use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::temporal::{Period, Temporal};

/// A value produced by evaluating an expression.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Decimal),
    Str(Arc<str>),
    Temporal(Temporal),
    Period(Period),
    List(Arc<[Value]>),
    /// Caller-owned data, dereferenced only through registered field accessors.
    Object(ObjectRef),
}

impl Value {
    #[inline]
    pub fn string(text: impl Into<Arc<str>>) -> Value {
        Value::Str(text.into())
    }

    #[inline]
    pub fn list(items: impl Into<Arc<[Value]>>) -> Value {
        Value::List(items.into())
    }

    #[inline]
    pub fn object<T: Any + Send + Sync>(object: T) -> Value {
        Value::Object(ObjectRef::new(object))
    }

    /// Type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Temporal(t) => t.kind_name(),
            Value::Period(_) => "period",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    /// `true` for values that can be written into a text slot.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::List(_) | Value::Object(_))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Temporal(a), Value::Temporal(b)) => a == b,
            (Value::Period(a), Value::Period(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Temporal(t) => write!(f, "Temporal({t})"),
            Value::Period(p) => write!(f, "Period({p})"),
            Value::List(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Object(o) => write!(f, "Object({})", o.type_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<Decimal> for Value {
    fn from(n: Decimal) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl From<Temporal> for Value {
    fn from(t: Temporal) -> Self {
        Value::Temporal(t)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(Arc::from(items))
    }
}

/// Opaque reference to caller data.
///
/// The core never looks inside; field access is forwarded to the accessor
/// registered for the referenced type.
#[derive(Clone)]
pub struct ObjectRef {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ObjectRef {
    pub fn new<T: Any + Send + Sync>(object: T) -> Self {
        ObjectRef::from_arc(Arc::new(object))
    }

    pub fn from_arc<T: Any + Send + Sync>(object: Arc<T>) -> Self {
        ObjectRef {
            inner: object,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// `TypeId` of the referenced value (not of the `Arc`).
    pub fn type_id(&self) -> TypeId {
        Any::type_id(&*self.inner)
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectRef").field(&self.type_name).finish()
    }
}

/// A plain string-keyed record.
///
/// Used for data that arrives without a Rust type of its own, e.g. JSON
/// objects. Records are still opaque to the evaluator and need an accessor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Wrap into an object value.
    pub fn into_value(self) -> Value {
        Value::object(self)
    }
}
