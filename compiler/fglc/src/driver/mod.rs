//! Multi-module checking.
//!
//! Each module is parsed and resolved on its own first; lookups that may be
//! satisfied by another module are deferred. Once every module has been
//! parsed, a [`ProjectIndex`] over all of them drains the deferred lookups,
//! and whatever is still pending becomes an error.

use std::fmt::Write as _;
use std::path::Path;

use fgl_diagnostic::{Diagnostic, DiagnosticQueue};
use fgl_parse::{parse_source, ParseOptions, ParseResult};
use fgl_resolve::{
    check_for_errors, report_unresolved, retry_deferred, AnalysisEnv, DeferredSearches,
    ModuleAnalysis, ProjectIndex, ResolveError,
};
use rayon::prelude::*;

use crate::CheckOptions;

/// One source file of the project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceModule {
    /// Path as given on the command line; used in rendered diagnostics.
    pub path: String,
    pub source: String,
}

impl SourceModule {
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        SourceModule {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Module name used for qualified lookups: the lowercased file stem.
    pub fn module_name(&self) -> String {
        Path::new(&self.path)
            .file_stem()
            .map_or_else(|| self.path.clone(), |s| s.to_string_lossy().into_owned())
            .to_ascii_lowercase()
    }
}

/// Sorted diagnostics of one module, with 1-based line and column.
#[derive(Clone, Debug)]
pub struct ModuleReport {
    pub path: String,
    pub diagnostics: Vec<(u32, u32, Diagnostic)>,
}

impl ModuleReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|(_, _, d)| d.is_error()).count()
    }

    /// Render every diagnostic as `path:line:col: error[CODE]: message`.
    ///
    /// Notes follow on their own lines. A diagnostic with no position (the
    /// error-limit notice) renders as `path: ...`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (line, column, diagnostic) in &self.diagnostics {
            // Writing to a String cannot fail.
            let _ = if *line == u32::MAX {
                writeln!(out, "{}: {diagnostic}", self.path)
            } else {
                writeln!(out, "{}:{line}:{column}: {diagnostic}", self.path)
            };
            for note in &diagnostic.notes {
                let _ = writeln!(out, "  = note: {note}");
            }
        }
        out
    }
}

/// Per-module state between the resolution phases.
struct ModuleState {
    parsed: ParseResult,
    analysis: ModuleAnalysis,
    deferred: DeferredSearches,
    errors: Vec<ResolveError>,
}

/// Parse and resolve every module, returning one report per module in
/// input order.
#[tracing::instrument(level = "debug", skip_all, fields(modules = modules.len()))]
pub fn check_modules(modules: &[SourceModule], options: &CheckOptions) -> Vec<ModuleReport> {
    let parse_options = ParseOptions::new(options.version);

    // No other module is known yet: every outside lookup is deferred.
    let pending = ProjectIndex::new();
    let mut states: Vec<ModuleState> = modules
        .par_iter()
        .map(|module| {
            let parsed = parse_source(&module.source, parse_options);
            let env = AnalysisEnv::new(options.version)
                .with_functions(&pending)
                .with_program(&pending);
            let mut state = ModuleState {
                parsed,
                analysis: ModuleAnalysis::new(),
                deferred: DeferredSearches::new(),
                errors: Vec::new(),
            };
            let errors = &mut state.errors;
            check_for_errors(
                &state.parsed.ast,
                &mut state.analysis,
                &env,
                &mut state.deferred,
                options.search_mode,
                false,
                &mut |e| errors.push(e),
            );
            state
        })
        .collect();

    let mut index = ProjectIndex::new();
    for (module, state) in modules.iter().zip(&states) {
        index.add_module(&module.module_name(), &state.parsed.ast);
    }
    // Every module is loaded, so misses fall back to built-ins.
    index.seal();
    let deferred_total: usize = states.iter().map(|s| s.deferred.len()).sum();
    tracing::debug!(deferred_total, "project index built");

    states.par_iter_mut().for_each(|state| {
        let env = AnalysisEnv::new(options.version)
            .with_functions(&index)
            .with_program(&index);
        let errors = &mut state.errors;
        retry_deferred(
            &state.parsed.ast,
            &mut state.analysis,
            &env,
            &mut state.deferred,
            false,
            &mut |e| errors.push(e),
        );
        report_unresolved(&state.deferred, &mut |e| errors.push(e));
    });

    modules
        .iter()
        .zip(states)
        .map(|(module, state)| report(module, &state, options))
        .collect()
}

fn report(module: &SourceModule, state: &ModuleState, options: &CheckOptions) -> ModuleReport {
    let mut queue = DiagnosticQueue::with_config(&module.source, options.diagnostic_config());
    queue.extend(state.parsed.errors.iter().map(fgl_parse::ParseError::to_diagnostic));
    queue.extend(state.errors.iter().map(ResolveError::to_diagnostic));
    let diagnostics = queue.flush();
    tracing::debug!(
        path = %module.path,
        resolved = state.analysis.len(),
        diagnostics = diagnostics.len(),
        "module checked"
    );
    ModuleReport {
        path: module.path.clone(),
        diagnostics,
    }
}
