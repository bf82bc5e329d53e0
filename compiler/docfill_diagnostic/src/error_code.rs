//! Error codes for docfill diagnostics.
//!
//! Format: E#### where the first digit indicates the phase:
//! - E0xxx: Lexer errors
//! - E1xxx: Parser errors
//! - E2xxx: Evaluation errors
//! - E3xxx: Template / extraction errors

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Invalid character, unterminated string or bad escape
    E0001,

    // Parser Errors (E1xxx)
    /// Unexpected token, unmatched parenthesis or empty expression
    E1001,

    // Evaluation Errors (E2xxx)
    /// Unresolved identifier or function
    E2001,
    /// Type mismatch
    E2002,
    /// Non-scalar value in a text slot
    E2003,
    /// Arithmetic error
    E2004,
    /// Invalid format pattern or unparsable input
    E2005,

    // Template Errors (E3xxx)
    /// Unbalanced placeholder delimiters
    E3001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E1001,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E3001,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E3001 => "E3001",
        }
    }

    /// One-line explanation, printed by `docfill check`.
    pub const fn description(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "invalid character or malformed literal",
            ErrorCode::E1001 => "malformed expression",
            ErrorCode::E2001 => "unresolved identifier or function",
            ErrorCode::E2002 => "type mismatch",
            ErrorCode::E2003 => "list or object used as text",
            ErrorCode::E2004 => "arithmetic error",
            ErrorCode::E2005 => "invalid format pattern or input",
            ErrorCode::E3001 => "unbalanced placeholder delimiters",
        }
    }

    pub const fn is_lexer_error(self) -> bool {
        matches!(self, ErrorCode::E0001)
    }

    pub const fn is_parser_error(self) -> bool {
        matches!(self, ErrorCode::E1001)
    }

    pub const fn is_eval_error(self) -> bool {
        matches!(
            self,
            ErrorCode::E2001
                | ErrorCode::E2002
                | ErrorCode::E2003
                | ErrorCode::E2004
                | ErrorCode::E2005
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_variants_classified() {
        for code in ErrorCode::ALL {
            let phases = [
                code.is_lexer_error(),
                code.is_parser_error(),
                code.is_eval_error(),
                code.as_str().starts_with("E3"),
            ];
            assert_eq!(
                phases.iter().filter(|p| **p).count(),
                1,
                "{code} must belong to exactly one phase"
            );
        }
    }

    #[test]
    fn test_display_matches_as_str() {
        for code in ErrorCode::ALL {
            assert_eq!(code.to_string(), code.as_str());
            assert!(!code.description().is_empty());
        }
    }
}
