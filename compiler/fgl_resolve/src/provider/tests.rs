#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::tests::{find_node, parse};

const LIB: &str = "\
GLOBALS
  DEFINE g_user STRING
END GLOBALS
PUBLIC DEFINE p_count INTEGER
DEFINE m_hidden INTEGER
PUBLIC CONSTANT c_max = 10
PUBLIC FUNCTION typed(a INTEGER) RETURNS (INTEGER, STRING)
  RETURN a, \"x\"
END FUNCTION
FUNCTION legacy(a)
  DEFINE a INTEGER
  IF a > 0 THEN
    RETURN a, a, a
  END IF
  RETURN 0, 0, 0
END FUNCTION
PRIVATE FUNCTION helper()
END FUNCTION
";

fn function_kind(result: ProviderResult) -> Option<ExternalKind> {
    match result {
        ProviderResult::Found(entity) => Some(entity.kind),
        _ => None,
    }
}

#[test]
fn test_functions_indexed_plain_and_qualified() {
    let ast = parse(LIB);
    let mut index = ProjectIndex::new();
    index.add_module("Lib", &ast);

    assert_eq!(
        function_kind(index.find_function("typed")),
        Some(ExternalKind::Function { returns: 2 })
    );
    assert_eq!(
        function_kind(index.find_function("LIB.TYPED")),
        Some(ExternalKind::Function { returns: 2 })
    );
    assert_eq!(
        function_kind(index.find_function("legacy")),
        Some(ExternalKind::Function { returns: 3 })
    );
    let ProviderResult::Found(entity) = index.find_function("lib.legacy") else {
        panic!("legacy not indexed");
    };
    assert_eq!(entity.origin.as_deref(), Some("Lib"));
}

#[test]
fn test_private_functions_are_not_exported() {
    let ast = parse(LIB);
    let mut index = ProjectIndex::new();
    index.add_module("lib", &ast);
    index.seal();
    assert_eq!(index.find_function("helper"), ProviderResult::NotFound);
}

#[test]
fn test_misses_before_and_after_sealing() {
    let mut index = ProjectIndex::new();
    assert!(!index.is_sealed());
    assert_eq!(index.find_function("nowhere"), ProviderResult::SearchLater);
    assert_eq!(index.find_declaration("nowhere"), ProviderResult::SearchLater);
    index.seal();
    assert_eq!(index.find_function("nowhere"), ProviderResult::NotFound);
    assert_eq!(index.find_declaration("nowhere"), ProviderResult::NotFound);
}

#[test]
fn test_declarations_from_globals_and_public_statements() {
    let ast = parse(LIB);
    let mut index = ProjectIndex::new();
    index.add_module("lib", &ast);
    index.seal();

    assert_eq!(
        function_kind(index.find_declaration("G_USER")),
        Some(ExternalKind::Variable)
    );
    assert_eq!(
        function_kind(index.find_declaration("p_count")),
        Some(ExternalKind::Variable)
    );
    assert_eq!(
        function_kind(index.find_declaration("c_max")),
        Some(ExternalKind::Constant)
    );
    assert_eq!(index.find_declaration("m_hidden"), ProviderResult::NotFound);
}

#[test]
fn test_return_count_of_function_without_returns() {
    let ast = parse("FUNCTION f()\n  DISPLAY 1\nEND FUNCTION\n");
    let f = find_node(&ast, |k| matches!(k, NodeKind::Function { .. }));
    assert_eq!(function_return_count(&ast, f), 0);
}

#[test]
fn test_declarations_also_indexed_by_module() {
    let ast = parse(LIB);
    let mut index = ProjectIndex::new();
    index.add_module("Lib", &ast);
    index.seal();
    let ProviderResult::Found(entity) = index.find_declaration("lib.c_max") else {
        panic!("c_max not indexed under its module");
    };
    assert_eq!(entity.origin.as_deref(), Some("Lib"));
    assert_eq!(index.find_declaration("other.c_max"), ProviderResult::NotFound);
}
