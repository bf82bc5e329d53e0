//! Docfill IR - shared data types for the expression pipeline.
//!
//! This crate contains the types every other docfill crate agrees on:
//! - `Span` for byte offsets into placeholder text
//! - `Expr` / `ExprKind`, the closed expression tree
//! - `Value`, the runtime value union, with its temporal and object payloads
//!
//! # Design Philosophy
//!
//! - **Immutable trees**: an `Expr` never changes after the parser returns it,
//!   so one compiled tree can be shared by any number of merges and threads.
//! - **Cheap clones**: strings, lists and objects sit behind `Arc`, so binding a
//!   list item into a child scope never copies the item.

pub mod ast;
mod span;
mod temporal;
mod value;

pub use ast::{BinaryOp, Expr, ExprKind, Name, UnaryOp};
pub use span::Span;
pub use temporal::{Period, Temporal, TemporalUnit};
pub use value::{ObjectRef, Record, Value};

// Re-exported so downstream crates agree on one decimal/chrono version.
pub use chrono;
pub use rust_decimal::Decimal;
