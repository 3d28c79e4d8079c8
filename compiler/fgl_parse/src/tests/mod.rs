//! Parser tests.
//!
//! - `parser`: whole-module parses covering recovery, loop validation,
//!   version gates and the attribute side table
//!
//! Grammar-level tests live beside each grammar module.


use fgl_ir::{Ast, LanguageVersion, NodeId, NodeKind};

use crate::{parse_source, ParseOptions, ParseResult};

/// Parse at the latest language version.
pub(crate) fn parse_latest(source: &str) -> ParseResult {
    parse_source(source, ParseOptions::default())
}

pub(crate) fn parse_at(source: &str, version: LanguageVersion) -> ParseResult {
    parse_source(source, ParseOptions::new(version))
}

/// First node, in allocation order, whose kind satisfies `pred`.
pub(crate) fn find(ast: &Ast, pred: impl Fn(&NodeKind) -> bool) -> Option<NodeId> {
    ast.iter().find(|(_, node)| pred(&node.kind)).map(|(id, _)| id)
}

/// Every node whose kind satisfies `pred`.
pub(crate) fn find_all(ast: &Ast, pred: impl Fn(&NodeKind) -> bool) -> Vec<NodeId> {
    ast.iter()
        .filter(|(_, node)| pred(&node.kind))
        .map(|(id, _)| id)
        .collect()
}

/// Error codes in report order, for compact assertions.
pub(crate) fn codes(result: &ParseResult) -> Vec<fgl_diagnostic::ErrorCode> {
    result.errors.iter().map(|e| e.code).collect()
}
