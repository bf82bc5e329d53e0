//! Evaluation of docfill expressions.
//!
//! # Architecture
//!
//! - [`VariableContext`]: a scope chain of local bindings over an
//!   [`Environment`]
//! - [`Environment`]: the ordered [`ResolverChain`] and the
//!   [`AccessorRegistry`] for caller objects
//! - [`evaluate`]: tree walk with short-circuit logic and null-propagating
//!   field access
//! - [`evaluate_binary`] / [`evaluate_unary`]: operator semantics, shared
//!   with constant folding
//! - [`builtins`]: the number and temporal resolvers
//! - [`Formats`]: value to text conversion for merge output
//!
//! Lookup order for an identifier: innermost scope outward, then each
//! resolver in registration order. Functions go straight to the resolvers.

mod accessor;
pub mod builtins;
mod context;
mod environment;
mod evaluator;
pub mod format;
mod navigate;
mod number_format;
mod operators;
mod resolver;
mod stack;
mod unary_operators;

pub use accessor::{AccessorRegistry, FieldAccessor, RecordAccessor};
pub use builtins::{NumberResolver, TemporalResolver};
pub use context::VariableContext;
pub use environment::{Environment, EnvironmentBuilder};
pub use evaluator::evaluate;
pub use format::{verticalize, Formats};
pub use number_format::NumberPattern;
pub use operators::evaluate_binary;
pub use resolver::{ExpressionResolver, FnResolver, ResolverChain};
pub use stack::ensure_sufficient_stack;
pub use unary_operators::evaluate_unary;

#[cfg(test)]
mod tests;
