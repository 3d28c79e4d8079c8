//! Parse error type.
//!
//! Syntax errors are plain data collected by the parser; nothing unwinds.
//! The parser keeps going after each one, so a module yields every error it
//! contains in a single pass.

use fgl_diagnostic::{Diagnostic, ErrorCode};
use fgl_ir::{LexError, LexErrorKind, Span, TokenKind};

/// A syntax error with its location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    /// Optional label text for the primary span.
    pub context: Option<String>,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Add context for better error messages.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// `expected X, found Y`, or an unexpected-end error at end of file.
    #[cold]
    pub fn expected(what: &str, found: TokenKind, span: Span) -> Self {
        if found == TokenKind::Eof {
            ParseError::new(
                ErrorCode::E1006,
                format!("unexpected end of file, expected {what}"),
                span,
            )
        } else {
            ParseError::new(
                ErrorCode::E1001,
                format!("expected {what}, found {}", found.display_name()),
                span,
            )
        }
    }

    /// A required comma-separated list had no items.
    #[cold]
    pub fn empty_list(what: &str, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1007,
            format!("expected at least one {what}"),
            span,
        )
    }

    /// A construct lost its closing `END x` or delimiter.
    #[cold]
    pub fn missing_close(closer: &str, at_eof: bool, span: Span) -> Self {
        let message = if at_eof {
            format!("unexpected end of file, missing {closer}")
        } else {
            format!("missing {closer}")
        };
        ParseError::new(ErrorCode::E1003, message, span)
    }

    #[cold]
    pub fn from_lex_error(error: &LexError) -> Self {
        let (code, message) = match error.kind {
            LexErrorKind::UnterminatedString => (ErrorCode::E0001, "unterminated string literal"),
            LexErrorKind::InvalidCharacter => (ErrorCode::E0002, "invalid character"),
            LexErrorKind::UnterminatedComment => (ErrorCode::E0003, "unterminated comment"),
        };
        ParseError::new(code, message, error.span)
    }

    /// Convert to a full Diagnostic for rich error reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.span, self.context.as_deref().unwrap_or("here"))
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}: {}", self.code, self.span, self.message)
    }
}
