//! The resolution pass.
//!
//! [`check_for_errors`] walks a module bottom-up, binds every name reference,
//! type reference and cursor reference it can, and reports what it cannot.
//! References that may live in a module not loaded yet are recorded in the
//! [`DeferredSearches`] instead. The host later calls [`retry_deferred`] once
//! more modules are known, and [`report_unresolved`] once all of them are.

use fgl_diagnostic::ErrorCode;
use fgl_ir::{Ast, NodeId, NodeKind, Span};
use rustc_hash::FxHashSet;

use crate::analysis::{AnalysisEnv, ModuleAnalysis, ResolveError, SearchMode};
use crate::deferred::DeferredSearches;

mod resolver;

use resolver::Resolver;

/// Resolve every reference of `ast` and report resolution errors.
///
/// Previous results in `analysis` are replaced. With
/// `is_call_or_definition`, every name is treated as being in call context:
/// member paths are looked up as qualified function names.
#[tracing::instrument(level = "debug", skip_all, fields(nodes = ast.len(), mode = ?mode))]
pub fn check_for_errors(
    ast: &Ast,
    analysis: &mut ModuleAnalysis,
    env: &AnalysisEnv<'_>,
    deferred: &mut DeferredSearches,
    mode: SearchMode,
    is_call_or_definition: bool,
    on_error: &mut dyn FnMut(ResolveError),
) {
    analysis.clear();
    let Some(root) = ast.root() else {
        return;
    };
    let mut resolver = Resolver::new(
        ast,
        env,
        mode,
        is_call_or_definition,
        analysis,
        deferred,
        on_error,
    );
    for id in ast.post_order(root) {
        resolver.visit(id);
    }
}

/// Re-resolve the references recorded in `deferred`.
///
/// Only the nodes at the recorded offsets are visited, along with the
/// return-count checks of calls to them. Lookups that are still pending are
/// recorded again in `deferred`. `is_call_or_definition` must match the
/// pass that deferred them, so the same keys are looked up again.
#[tracing::instrument(level = "debug", skip_all, fields(pending = deferred.len()))]
pub fn retry_deferred(
    ast: &Ast,
    analysis: &mut ModuleAnalysis,
    env: &AnalysisEnv<'_>,
    deferred: &mut DeferredSearches,
    is_call_or_definition: bool,
    on_error: &mut dyn FnMut(ResolveError),
) {
    if deferred.is_empty() {
        return;
    }
    let pending = deferred.take();
    let offsets: FxHashSet<u32> = pending
        .iter_sorted()
        .into_iter()
        .map(|(_, offset)| offset)
        .collect();
    let mut targets: Vec<NodeId> = ast
        .iter()
        .filter(|(_, node)| offsets.contains(&node.span.start) && is_deferrable(&node.kind))
        .map(|(id, _)| id)
        .collect();
    targets.sort_unstable();

    let mut resolver = Resolver::new(
        ast,
        env,
        SearchMode::Full,
        is_call_or_definition,
        analysis,
        deferred,
        on_error,
    );
    for &id in &targets {
        resolver.visit(id);
    }
    for (id, node) in ast.iter() {
        if let NodeKind::Call {
            callee: Some(callee),
            ..
        } = &node.kind
        {
            if targets.binary_search(callee).is_ok() {
                resolver.check_call_arity(id);
            }
        }
    }
}

/// Report every lookup still left in `deferred` once all modules are loaded.
pub fn report_unresolved(deferred: &DeferredSearches, on_error: &mut dyn FnMut(ResolveError)) {
    for (key, offset) in deferred.iter_sorted() {
        let len = u32::try_from(key.len()).unwrap_or(u32::MAX);
        on_error(ResolveError::new(
            ErrorCode::E2006,
            format!("no definition found for `{key}` in any loaded module"),
            Span::new(offset, offset.saturating_add(len)),
        ));
    }
}

/// Nodes whose lookups can be deferred.
fn is_deferrable(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Name { .. }
            | NodeKind::NamedType { .. }
            | NodeKind::LikeType { .. }
            | NodeKind::Whenever { .. }
    )
}
