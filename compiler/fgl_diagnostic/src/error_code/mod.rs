//! Error codes for all front-end diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the phase.

use std::fmt;

/// Error codes for all front-end diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Syntax errors
/// - E2xxx: Resolution errors
/// - E9xxx: Driver errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Unterminated `{ ... }` comment
    E0003,

    // Syntax Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Missing closing delimiter or `END` keyword
    E1003,
    /// Expected identifier
    E1004,
    /// Expected type
    E1005,
    /// Unexpected end of file
    E1006,
    /// Required list is empty
    E1007,
    /// EXIT or CONTINUE outside a matching construct
    E1008,
    /// Syntax requires a newer language version
    E1009,
    /// Invalid literal
    E1010,

    // Resolution Errors (E2xxx)
    /// No definition found
    E2001,
    /// Wrong number of return variables
    E2002,
    /// Return target is not a variable
    E2003,
    /// Callee cannot be called
    E2004,
    /// Cursor or prepared statement not declared
    E2005,
    /// Cross-module lookup still unresolved after all modules loaded
    E2006,

    // Driver Errors (E9xxx)
    /// Too many errors
    E9001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        ErrorCode::E1009,
        ErrorCode::E1010,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E9001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line description for `--explain` style listings.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "invalid character",
            ErrorCode::E0003 => "unterminated comment",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "missing closing delimiter",
            ErrorCode::E1004 => "expected identifier",
            ErrorCode::E1005 => "expected type",
            ErrorCode::E1006 => "unexpected end of file",
            ErrorCode::E1007 => "empty list",
            ErrorCode::E1008 => "invalid exit statement",
            ErrorCode::E1009 => "requires a newer language version",
            ErrorCode::E1010 => "invalid literal",
            ErrorCode::E2001 => "no definition found",
            ErrorCode::E2002 => "return count mismatch",
            ErrorCode::E2003 => "not a variable",
            ErrorCode::E2004 => "not callable",
            ErrorCode::E2005 => "undeclared cursor",
            ErrorCode::E2006 => "unresolved cross-module reference",
            ErrorCode::E9001 => "too many errors",
        }
    }

    /// Lexer and syntax errors.
    pub fn is_syntax_error(&self) -> bool {
        matches!(self.as_str().as_bytes().get(1), Some(b'0' | b'1'))
    }

    pub fn is_resolve_error(&self) -> bool {
        matches!(self.as_str().as_bytes().get(1), Some(b'2'))
    }

    /// Parse an error code string like `"E2001"`. Case-insensitive.
    pub fn parse(text: &str) -> Option<ErrorCode> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(text.trim()))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests;
