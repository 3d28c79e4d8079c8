//! Grammar Modules
//!
//! Parsing implementations for FGL constructs. Each module extends `Parser`
//! with methods for one family of productions:
//!
//! - [`item`]: module structure (imports, globals, declarations, routines)
//! - [`ty`]: type references
//! - [`expr`]: expressions and name paths
//! - [`stmt`]: statements, including embedded SQL
//!
//! Productions named `try_*` return `None` without consuming anything when
//! the construct is absent; the caller decides whether that is an error.
//! Productions entered on their leading keyword always return a node, even
//! a truncated one.

mod expr;
mod item;
mod stmt;
mod ty;
