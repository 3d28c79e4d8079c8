//! Identifiers.
//!
//! FGL identifiers are case-insensitive. An `Ident` keeps the spelling the
//! user wrote (for rendering) and compares through its lowercase key.

use std::fmt;

use crate::Span;

/// An identifier occurrence with its original spelling.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Ident {
    pub text: Box<str>,
    pub span: Span,
}

impl Ident {
    pub fn new(text: impl Into<Box<str>>, span: Span) -> Self {
        Ident {
            text: text.into(),
            span,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lowercase lookup key.
    pub fn key(&self) -> String {
        self.text.to_ascii_lowercase()
    }

    /// Case-insensitive comparison against a plain string.
    #[inline]
    pub fn is(&self, other: &str) -> bool {
        self.text.eq_ignore_ascii_case(other)
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.text, self.span)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
