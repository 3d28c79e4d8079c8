//! Per-module resolution results and the environment they are computed in.

use std::fmt;

use fgl_diagnostic::{Diagnostic, ErrorCode};
use fgl_ir::{Ast, LanguageVersion, NodeId, Span};
use rustc_hash::FxHashMap;

use crate::entity::Resolution;
use crate::provider::{DatabaseProvider, FunctionProvider, ProgramFileProvider};

/// Resolutions of one module, keyed by the referencing node.
///
/// A full check replaces every entry; retrying deferred lookups overwrites
/// only the entries it re-resolves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleAnalysis {
    resolutions: FxHashMap<NodeId, Resolution>,
}

impl ModuleAnalysis {
    pub fn new() -> Self {
        ModuleAnalysis::default()
    }

    pub fn get(&self, node: NodeId) -> Option<&Resolution> {
        self.resolutions.get(&node)
    }

    pub fn set(&mut self, node: NodeId, resolution: Resolution) {
        self.resolutions.insert(node, resolution);
    }

    pub fn remove(&mut self, node: NodeId) -> Option<Resolution> {
        self.resolutions.remove(&node)
    }

    pub fn len(&self) -> usize {
        self.resolutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolutions.is_empty()
    }

    pub fn clear(&mut self) {
        self.resolutions.clear();
    }

    /// Resolutions ordered by node id.
    pub fn iter_sorted(&self) -> Vec<(NodeId, &Resolution)> {
        let mut out: Vec<_> = self.resolutions.iter().map(|(id, r)| (*id, r)).collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }
}

/// How far a check may look.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SearchMode {
    /// Consult external providers and defer cross-module lookups.
    #[default]
    Full,
    /// Local and built-in lookups only; nothing is deferred, and names that
    /// would need a provider are left unresolved without a diagnostic.
    Quick,
}

/// Language version and external providers for a check.
#[derive(Copy, Clone, Default)]
pub struct AnalysisEnv<'p> {
    pub version: LanguageVersion,
    pub functions: Option<&'p dyn FunctionProvider>,
    pub database: Option<&'p dyn DatabaseProvider>,
    pub program: Option<&'p dyn ProgramFileProvider>,
}

impl<'p> AnalysisEnv<'p> {
    pub fn new(version: LanguageVersion) -> Self {
        AnalysisEnv {
            version,
            ..AnalysisEnv::default()
        }
    }

    /// Environment at the version `ast` was parsed for, without providers.
    pub fn for_ast(ast: &Ast) -> Self {
        AnalysisEnv::new(ast.version())
    }

    #[must_use]
    pub fn with_functions(mut self, provider: &'p dyn FunctionProvider) -> Self {
        self.functions = Some(provider);
        self
    }

    #[must_use]
    pub fn with_database(mut self, provider: &'p dyn DatabaseProvider) -> Self {
        self.database = Some(provider);
        self
    }

    #[must_use]
    pub fn with_program(mut self, provider: &'p dyn ProgramFileProvider) -> Self {
        self.program = Some(provider);
        self
    }
}

impl fmt::Debug for AnalysisEnv<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisEnv")
            .field("version", &self.version)
            .field("functions", &self.functions.is_some())
            .field("database", &self.database.is_some())
            .field("program", &self.program.is_some())
            .finish()
    }
}

/// A resolution error with its location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolveError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
}

impl ResolveError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ResolveError {
            code,
            message: message.into(),
            span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.span, self.code.description())
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.code, self.span, self.message)
    }
}
