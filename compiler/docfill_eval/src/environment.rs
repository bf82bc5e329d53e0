//! Merge-time configuration shared by every scope.

use std::any::Any;

use docfill_ir::Value;

use crate::accessor::{AccessorRegistry, FieldAccessor};
use crate::builtins::{NumberResolver, TemporalResolver};
use crate::resolver::{ExpressionResolver, ResolverChain};

/// Resolvers and field accessors for one merge.
///
/// An `Environment` is immutable once built and `Sync`, so one instance can
/// serve concurrent merges.
#[derive(Default)]
pub struct Environment {
    resolvers: ResolverChain,
    accessors: AccessorRegistry,
}

impl Environment {
    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::default()
    }

    /// Number and temporal builtins, plus the [`Record`](docfill_ir::Record)
    /// accessor.
    pub fn standard() -> Self {
        Environment::builder().builtins().build()
    }

    pub fn resolvers(&self) -> &ResolverChain {
        &self.resolvers
    }

    pub fn accessors(&self) -> &AccessorRegistry {
        &self.accessors
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("resolvers", &self.resolvers.names().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Environment`]. Resolvers are consulted in the order added.
#[derive(Default)]
pub struct EnvironmentBuilder {
    resolvers: ResolverChain,
    accessors: AccessorRegistry,
}

impl EnvironmentBuilder {
    #[must_use]
    pub fn resolver(mut self, resolver: impl ExpressionResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Append the number resolver, then the temporal resolver.
    #[must_use]
    pub fn builtins(self) -> Self {
        self.resolver(NumberResolver).resolver(TemporalResolver::new())
    }

    #[must_use]
    pub fn accessor<T: Any>(mut self, accessor: impl FieldAccessor + 'static) -> Self {
        self.accessors.register::<T>(Box::new(accessor));
        self
    }

    /// Register a closure that reads fields of `T`.
    #[must_use]
    pub fn accessor_fn<T, F>(mut self, read: F) -> Self
    where
        T: Any,
        F: Fn(&T, &str) -> Option<Value> + Send + Sync + 'static,
    {
        self.accessors.register_fn::<T, F>(read);
        self
    }

    pub fn build(self) -> Environment {
        Environment {
            resolvers: self.resolvers,
            accessors: self.accessors,
        }
    }
}
