//! Field access on caller-owned objects.
//!
//! The evaluator never inspects an [`ObjectRef`] itself. Field reads are
//! forwarded to the accessor registered for the object's concrete type.

use std::any::{Any, TypeId};
use std::marker::PhantomData;

use rustc_hash::FxHashMap;

use docfill_diagnostic::errors::{no_accessor, unknown_field};
use docfill_diagnostic::Result;
use docfill_ir::{ObjectRef, Record, Value};

/// Reads named fields from one object type.
pub trait FieldAccessor: Send + Sync {
    /// `Ok(None)` means the type has no such field.
    fn field(&self, object: &ObjectRef, name: &str) -> Result<Option<Value>>;
}

/// Accessor backed by a closure over the concrete type.
struct TypedAccessor<T, F> {
    read: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> FieldAccessor for TypedAccessor<T, F>
where
    T: Any,
    F: Fn(&T, &str) -> Option<Value> + Send + Sync,
{
    fn field(&self, object: &ObjectRef, name: &str) -> Result<Option<Value>> {
        Ok(object.downcast_ref::<T>().and_then(|target| (self.read)(target, name)))
    }
}

/// Built-in accessor for [`Record`].
pub struct RecordAccessor;

impl FieldAccessor for RecordAccessor {
    fn field(&self, object: &ObjectRef, name: &str) -> Result<Option<Value>> {
        Ok(object
            .downcast_ref::<Record>()
            .and_then(|record| record.get(name))
            .cloned())
    }
}

/// Accessors keyed by the `TypeId` of the object they read.
pub struct AccessorRegistry {
    by_type: FxHashMap<TypeId, Box<dyn FieldAccessor>>,
}

impl AccessorRegistry {
    /// A registry that knows only [`Record`].
    pub fn new() -> Self {
        let mut registry = AccessorRegistry::empty();
        registry.register::<Record>(Box::new(RecordAccessor));
        registry
    }

    pub fn empty() -> Self {
        AccessorRegistry {
            by_type: FxHashMap::default(),
        }
    }

    /// Register (or replace) the accessor for `T`.
    pub fn register<T: Any>(&mut self, accessor: Box<dyn FieldAccessor>) {
        self.by_type.insert(TypeId::of::<T>(), accessor);
    }

    /// Register a closure accessor for `T`.
    pub fn register_fn<T, F>(&mut self, read: F)
    where
        T: Any,
        F: Fn(&T, &str) -> Option<Value> + Send + Sync + 'static,
    {
        self.register::<T>(Box::new(TypedAccessor {
            read,
            _marker: PhantomData,
        }));
    }

    /// Read `name` from `object`.
    ///
    /// A missing accessor and a missing field are both `UnresolvedReference`
    /// errors, with messages that say which one happened.
    pub fn read(&self, object: &ObjectRef, name: &str) -> Result<Value> {
        let accessor = self
            .by_type
            .get(&object.type_id())
            .ok_or_else(|| no_accessor(object.type_name(), name))?;
        accessor
            .field(object, name)?
            .ok_or_else(|| unknown_field(object.type_name(), name))
    }
}

impl Default for AccessorRegistry {
    fn default() -> Self {
        AccessorRegistry::new()
    }
}
