//! Pluggable identifier and function resolution.
//!
//! Resolvers are consulted in registration order after local bindings miss.
//! The first resolver that returns `Some` wins; an `Err` stops the search.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::trace;

use docfill_diagnostic::Result;
use docfill_ir::Value;

use crate::context::VariableContext;

/// Supplies identifiers and functions that are not bound in scope.
///
/// Both methods default to "not handled". A resolver may read `scope` to
/// derive values from other bindings.
pub trait ExpressionResolver: Send + Sync {
    /// Name used in trace output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn resolve_identifier(&self, _name: &str, _scope: &VariableContext<'_>) -> Result<Option<Value>> {
        Ok(None)
    }

    fn resolve_function(
        &self,
        _name: &str,
        _args: &[Value],
        _scope: &VariableContext<'_>,
    ) -> Result<Option<Value>> {
        Ok(None)
    }
}

impl<R: ExpressionResolver + ?Sized> ExpressionResolver for Arc<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn resolve_identifier(&self, name: &str, scope: &VariableContext<'_>) -> Result<Option<Value>> {
        (**self).resolve_identifier(name, scope)
    }

    fn resolve_function(
        &self,
        name: &str,
        args: &[Value],
        scope: &VariableContext<'_>,
    ) -> Result<Option<Value>> {
        (**self).resolve_function(name, args, scope)
    }
}

/// Ordered list of resolvers.
#[derive(Default)]
pub struct ResolverChain {
    resolvers: Vec<Box<dyn ExpressionResolver>>,
}

impl ResolverChain {
    pub fn new() -> Self {
        ResolverChain::default()
    }

    pub fn push(&mut self, resolver: Box<dyn ExpressionResolver>) {
        self.resolvers.push(resolver);
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Resolver names in consultation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.resolvers.iter().map(|r| r.name())
    }

    pub fn resolve_identifier(&self, name: &str, scope: &VariableContext<'_>) -> Result<Option<Value>> {
        for resolver in &self.resolvers {
            if let Some(value) = resolver.resolve_identifier(name, scope)? {
                trace!(identifier = name, resolver = resolver.name(), "resolved");
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    pub fn resolve_function(
        &self,
        name: &str,
        args: &[Value],
        scope: &VariableContext<'_>,
    ) -> Result<Option<Value>> {
        for resolver in &self.resolvers {
            if let Some(value) = resolver.resolve_function(name, args, scope)? {
                trace!(function = name, argc = args.len(), resolver = resolver.name(), "resolved");
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

type NativeFn = Arc<dyn Fn(&[Value]) -> Result<Option<Value>> + Send + Sync>;

/// A resolver assembled from closures and fixed values.
///
/// ```ignore
/// let resolver = FnResolver::new("app")
///     .constant("TAX_RATE", Value::from(Decimal::new(8, 2)))
///     .function("double", |args| Ok(args.first().cloned()));
/// ```
///
/// A function closure returns `Ok(None)` to decline a call (for example an
/// arity it does not handle), which lets later resolvers try.
#[derive(Clone)]
pub struct FnResolver {
    name: String,
    constants: FxHashMap<String, Value>,
    functions: FxHashMap<String, NativeFn>,
}

impl FnResolver {
    pub fn new(name: impl Into<String>) -> Self {
        FnResolver {
            name: name.into(),
            constants: FxHashMap::default(),
            functions: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn constant(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constants.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn function<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(f));
        self
    }
}

impl ExpressionResolver for FnResolver {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve_identifier(&self, name: &str, _scope: &VariableContext<'_>) -> Result<Option<Value>> {
        Ok(self.constants.get(name).cloned())
    }

    fn resolve_function(
        &self,
        name: &str,
        args: &[Value],
        _scope: &VariableContext<'_>,
    ) -> Result<Option<Value>> {
        match self.functions.get(name) {
            Some(f) => f(args),
            None => Ok(None),
        }
    }
}
