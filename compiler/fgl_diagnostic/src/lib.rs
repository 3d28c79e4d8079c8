//! Diagnostic system for FGL front-end errors.
//!
//! - Error codes for searchability (E0xxx lexer, E1xxx syntax, E2xxx resolution)
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Notes (context)
//!
//! Parser and resolver errors are plain data; they convert into
//! [`Diagnostic`] at the edge, and [`queue::DiagnosticQueue`] sorts,
//! deduplicates and limits them for display.

mod diagnostic;
mod error_code;
pub mod queue;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
