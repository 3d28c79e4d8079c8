//! Command handlers for the `fglc` CLI.
//!
//! Handlers print their output and return a [`CliError`] for failures that
//! happen before any diagnostics exist; `main` maps those to exit codes.

mod check;
mod debug;
mod explain;

pub use check::{check_files, read_modules};
pub use debug::{lex_file, parse_file};
pub use explain::explain_error;

use crate::CliError;

/// Read a source file, classifying I/O failures.
pub fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| CliError::from_io(path, e))
}
