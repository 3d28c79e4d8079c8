//! Helpers shared by the unit tests, and end-to-end resolution scenarios.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use fgl_ir::{Ast, LanguageVersion, NodeId, NodeKind};
use fgl_parse::{parse_source, ParseOptions};

use crate::analysis::{AnalysisEnv, ModuleAnalysis, ResolveError, SearchMode};
use crate::check::check_for_errors;
use crate::deferred::DeferredSearches;

mod scenarios;

/// Parse at the latest language version; the source must be free of syntax
/// errors.
pub(crate) fn parse(source: &str) -> Ast {
    parse_at(source, LanguageVersion::LATEST)
}

pub(crate) fn parse_at(source: &str, version: LanguageVersion) -> Ast {
    let result = parse_source(source, ParseOptions::new(version));
    assert!(
        result.errors.is_empty(),
        "unexpected syntax errors: {:?}",
        result.errors
    );
    result.ast
}

/// First node matching `pred`.
pub(crate) fn find_node(ast: &Ast, pred: impl Fn(&NodeKind) -> bool) -> NodeId {
    ast.iter()
        .find(|(_, node)| pred(&node.kind))
        .map(|(id, _)| id)
        .expect("no matching node")
}

/// First name expression whose base is `name`.
pub(crate) fn find_name(ast: &Ast, name: &str) -> NodeId {
    find_node(ast, |kind| matches!(kind, NodeKind::Name { base, .. } if base.is(name)))
}

/// Outcome of checking one module.
pub(crate) struct Checked {
    pub ast: Ast,
    pub analysis: ModuleAnalysis,
    pub deferred: DeferredSearches,
    pub errors: Vec<ResolveError>,
}

impl Checked {
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }
}

/// Parse and check `source` in full mode under `env`.
pub(crate) fn check_with(source: &str, env: &AnalysisEnv<'_>) -> Checked {
    let ast = parse_at(source, env.version);
    let mut analysis = ModuleAnalysis::new();
    let mut deferred = DeferredSearches::new();
    let mut errors = Vec::new();
    check_for_errors(
        &ast,
        &mut analysis,
        env,
        &mut deferred,
        SearchMode::Full,
        false,
        &mut |e| errors.push(e),
    );
    Checked {
        ast,
        analysis,
        deferred,
        errors,
    }
}

/// Parse and check `source` without providers.
pub(crate) fn check(source: &str) -> Checked {
    check_with(source, &AnalysisEnv::new(LanguageVersion::LATEST))
}
