//! Error reporting for docfill.
//!
//! Every failure in the pipeline (lexing, parsing, extraction, evaluation)
//! is an [`ExpressionError`]: a structured [`ErrorKind`], a human-readable
//! message, the offending offset and the expression text. Errors never carry
//! a partial result.
//!
//! Constructors live in [`errors`] so messages are defined in one place.

mod error;
mod error_code;
pub mod errors;

pub use error::{ErrorKind, ExpressionError};
pub use error_code::ErrorCode;

/// Result alias used across the docfill crates.
pub type Result<T, E = ExpressionError> = std::result::Result<T, E>;
