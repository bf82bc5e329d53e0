//! The error type shared by every docfill phase.

use std::fmt;

use docfill_ir::Span;

use crate::error_code::ErrorCode;

/// Structured error category.
///
/// The `Display` impl is the default message; constructors in
/// [`crate::errors`] may refine it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// Invalid character or malformed literal in expression text.
    #[error("{reason}")]
    LexError { reason: String },

    /// Token stream does not form an expression.
    #[error("{reason}")]
    SyntaxError { reason: String },

    /// Identifier or function not found in scope or any resolver.
    #[error("cannot resolve `{name}`")]
    UnresolvedReference { name: String },

    /// An operand or argument has the wrong type.
    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A list or object reached a slot that needs text.
    #[error("expression produced a {found} where text was expected")]
    NonScalarResult { found: String },

    /// Arithmetic that has no result (division by zero, overflow).
    #[error("{reason}")]
    Arithmetic { reason: String },

    /// Placeholder delimiters do not pair up.
    #[error("placeholder is never closed with `{delimiter}`")]
    UnterminatedPlaceholder { delimiter: String },

    /// A format or parse pattern is invalid, or text does not match it.
    #[error("{reason} (pattern `{pattern}`)")]
    FormatError { pattern: String, reason: String },
}

impl ErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            ErrorKind::LexError { .. } => ErrorCode::E0001,
            ErrorKind::SyntaxError { .. } => ErrorCode::E1001,
            ErrorKind::UnresolvedReference { .. } => ErrorCode::E2001,
            ErrorKind::TypeMismatch { .. } => ErrorCode::E2002,
            ErrorKind::NonScalarResult { .. } => ErrorCode::E2003,
            ErrorKind::Arithmetic { .. } => ErrorCode::E2004,
            ErrorKind::FormatError { .. } => ErrorCode::E2005,
            ErrorKind::UnterminatedPlaceholder { .. } => ErrorCode::E3001,
        }
    }
}

/// An error raised while lexing, parsing, extracting or merging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionError {
    pub kind: ErrorKind,
    pub message: String,
    /// Location in `expression`, when known.
    pub span: Option<Span>,
    /// The expression (or text run) the span points into.
    pub expression: String,
}

impl ExpressionError {
    /// Create an error whose message is the kind's default message.
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        ExpressionError {
            kind,
            message,
            span: None,
            expression: String::new(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach a location unless one is already set.
    ///
    /// Inner failures know their exact location; outer frames only fill in
    /// what is missing.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    /// Attach the expression text unless one is already set.
    #[must_use]
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        if self.expression.is_empty() {
            self.expression = expression.into();
        }
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Byte offset of the error in `expression`.
    pub fn offset(&self) -> Option<usize> {
        self.span.map(|span| span.start as usize)
    }

    pub fn is_unresolved_reference(&self) -> bool {
        matches!(self.kind, ErrorKind::UnresolvedReference { .. })
    }

    /// Plain-text report with the expression and a caret line.
    ///
    /// ```text
    /// error[E2001]: cannot resolve `unknownVar`
    ///   | unknownVar + 1
    ///   | ^^^^^^^^^^
    /// ```
    pub fn render(&self) -> String {
        let mut out = format!("error[{}]: {}", self.code(), self.message);
        if self.expression.is_empty() {
            return out;
        }
        // Report only the first line the span touches.
        let (line, line_start) = line_containing(&self.expression, self.offset().unwrap_or(0));
        out.push_str("\n  | ");
        out.push_str(line);
        if let Some(span) = self.span {
            let start = (span.start as usize).saturating_sub(line_start).min(line.len());
            let width = (span.len() as usize).clamp(1, line.len().saturating_sub(start).max(1));
            let pad: String = line
                .get(..start)
                .unwrap_or_default()
                .chars()
                .map(|c| if c == '\t' { '\t' } else { ' ' })
                .collect();
            out.push_str("\n  | ");
            out.push_str(&pad);
            out.push_str(&"^".repeat(width));
        }
        out
    }
}

fn line_containing(text: &str, offset: usize) -> (&str, usize) {
    let offset = offset.min(text.len());
    let start = text
        .get(..offset)
        .and_then(|head| head.rfind('\n'))
        .map_or(0, |i| i + 1);
    let end = text
        .get(start..)
        .and_then(|tail| tail.find('\n'))
        .map_or(text.len(), |i| start + i);
    (text.get(start..end).unwrap_or_default(), start)
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)?;
        if !self.expression.is_empty() {
            write!(f, " in `{}`", self.expression)?;
        }
        if let Some(offset) = self.offset() {
            write!(f, " at offset {offset}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ExpressionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

#[cfg(test)]
mod tests;
