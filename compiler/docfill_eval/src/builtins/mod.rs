//! Built-in resolvers.
//!
//! [`Environment::standard`](crate::Environment::standard) installs both,
//! number first. Builtins sit in the resolver chain like any other
//! resolver, so a scope binding or an earlier resolver can shadow them.

mod args;
mod number;
mod temporal;

pub use number::NumberResolver;
pub use temporal::TemporalResolver;
