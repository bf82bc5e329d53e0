//! Variable scopes.
//!
//! A [`VariableContext`] holds local bindings and borrows its parent, so a
//! repeat iteration costs one small allocation and never copies the outer
//! scope. Lookups walk the chain outward; when no scope binds a name, the
//! environment's resolvers are asked with the innermost scope.

use docfill_diagnostic::Result;
use docfill_ir::{Name, Value};

use crate::environment::Environment;

/// One scope level.
///
/// Bindings are kept in insertion order; rebinding a name in the same scope
/// replaces its value.
pub struct VariableContext<'a> {
    bindings: Vec<(Name, Value)>,
    parent: Option<&'a VariableContext<'a>>,
    env: &'a Environment,
}

impl<'a> VariableContext<'a> {
    /// A root scope with no bindings.
    pub fn root(env: &'a Environment) -> Self {
        VariableContext {
            bindings: Vec::new(),
            parent: None,
            env,
        }
    }

    /// An empty scope nested in `self`.
    pub fn child(&self) -> VariableContext<'_> {
        VariableContext {
            bindings: Vec::new(),
            parent: Some(self),
            env: self.env,
        }
    }

    pub fn bind(&mut self, name: impl Into<Name>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.bindings.iter_mut().find(|(bound, _)| *bound == name) {
            Some(slot) => slot.1 = value,
            None => self.bindings.push((name, value)),
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<Name>, value: impl Into<Value>) -> Self {
        self.bind(name, value);
        self
    }

    /// Look `name` up in this scope and its ancestors only.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some((_, value)) = current.bindings.iter().find(|(bound, _)| &**bound == name) {
                return Some(value);
            }
            scope = current.parent;
        }
        None
    }

    /// Look `name` up in the scope chain, then in the resolvers.
    pub fn get(&self, name: &str) -> Result<Option<Value>> {
        if let Some(value) = self.lookup(name) {
            return Ok(Some(value.clone()));
        }
        self.env.resolvers().resolve_identifier(name, self)
    }

    /// Ask the resolvers for function `name`.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Option<Value>> {
        self.env.resolvers().resolve_function(name, args, self)
    }

    pub fn environment(&self) -> &'a Environment {
        self.env
    }

    /// Local bindings of this scope, in insertion order.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(name, value)| (&**name, value))
    }

    /// Number of scopes from the root (the root is 0).
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut scope = self.parent;
        while let Some(current) = scope {
            depth += 1;
            scope = current.parent;
        }
        depth
    }
}

impl std::fmt::Debug for VariableContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariableContext")
            .field("bindings", &self.bindings)
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}
