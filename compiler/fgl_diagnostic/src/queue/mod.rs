//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.
//!
//! Features:
//! - Error limits to prevent overwhelming output
//! - Deduplication of same-line syntax errors
//! - Deduplication of identical resolution errors at the same span

use fgl_ir::Span;

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, ErrorCode};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before stopping (0 = unlimited).
    pub error_limit: usize,
    /// Deduplicate diagnostics with same line and similar content.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 50,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Queued diagnostic with metadata for sorting and deduplication.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct QueuedDiagnostic {
    diagnostic: Diagnostic,
    line: u32,
    column: u32,
}

/// Queue for collecting, deduplicating, and sorting diagnostics of one module.
///
/// ```text
/// let mut queue = DiagnosticQueue::new(source);
/// queue.add(diagnostic);
/// let sorted = queue.flush();
/// ```
#[derive(Clone, Debug)]
pub struct DiagnosticQueue {
    diagnostics: Vec<QueuedDiagnostic>,
    lines: LineOffsetTable,
    error_count: usize,
    /// Set once an error was dropped because of the limit.
    overflowed: bool,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new(source: &str) -> Self {
        Self::with_config(source, DiagnosticConfig::default())
    }

    pub fn with_config(source: &str, config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            lines: LineOffsetTable::build(source),
            error_count: 0,
            overflowed: false,
            config,
        }
    }

    /// Add a diagnostic.
    ///
    /// Returns `true` if the diagnostic was added, `false` if it was filtered.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        let is_error = diag.is_error();
        if is_error && self.limit_reached() {
            self.overflowed = true;
            return false;
        }

        let (line, column) = diag
            .primary_span()
            .map_or((1, 1), |span| self.lines.line_col(span.start));

        if self.config.deduplicate && self.is_duplicate(&diag, line) {
            return false;
        }

        self.diagnostics.push(QueuedDiagnostic {
            diagnostic: diag,
            line,
            column,
        });
        if is_error {
            self.error_count += 1;
        }
        true
    }

    pub fn extend(&mut self, diags: impl IntoIterator<Item = Diagnostic>) {
        for diag in diags {
            self.add(diag);
        }
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Sort diagnostics by position and return them, clearing the queue.
    ///
    /// When errors were dropped by the limit, a trailing "too many errors"
    /// diagnostic is appended.
    pub fn flush(&mut self) -> Vec<(u32, u32, Diagnostic)> {
        self.diagnostics.sort_by_key(|d| (d.line, d.column));
        let mut result: Vec<_> = self
            .diagnostics
            .drain(..)
            .map(|d| (d.line, d.column, d.diagnostic))
            .collect();
        if self.overflowed {
            result.push((
                u32::MAX,
                1,
                too_many_errors(self.config.error_limit, Span::DUMMY),
            ));
        }
        self.error_count = 0;
        self.overflowed = false;
        result
    }

    /// Syntax errors on a line already reported are follow-ons of the first;
    /// other errors are duplicates when code, span and message match.
    fn is_duplicate(&self, diag: &Diagnostic, line: u32) -> bool {
        if !diag.is_error() {
            return false;
        }
        self.diagnostics.iter().any(|q| {
            if diag.code.is_syntax_error() {
                q.diagnostic.code.is_syntax_error() && q.line == line
            } else {
                q.diagnostic.code == diag.code
                    && q.diagnostic.primary_span() == diag.primary_span()
                    && q.diagnostic.message == diag.message
            }
        })
    }
}

/// Create a "too many errors" diagnostic.
#[cold]
pub fn too_many_errors(limit: usize, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9001)
        .with_message(format!("aborting after {limit} errors"))
        .with_label(span, "error limit reached")
        .with_note("use --error-limit to increase the limit")
}

#[cfg(test)]
mod tests;
