#![allow(clippy::unwrap_used, clippy::expect_used)]

use fgl_ir::{ImportKind, NodeKind};
use pretty_assertions::assert_eq;

use super::*;
use crate::tests::{find_name, parse};

#[test]
fn test_child_scope_shadows_and_falls_back() {
    let ast = parse("MAIN\nEND MAIN\n");
    let root = ast.root().unwrap();
    let mut module = Scope::new();
    module.bind("Total", Symbol::new(SymbolKind::Variable, root, None));
    module.bind("count", Symbol::new(SymbolKind::Constant, root, None));

    let mut local = module.child();
    local.bind("COUNT", Symbol::new(SymbolKind::Parameter, root, None));

    assert_eq!(local.lookup("count").unwrap().kind, SymbolKind::Parameter);
    assert_eq!(local.lookup("total").unwrap().kind, SymbolKind::Variable);
    assert!(local.lookup_local("total").is_none());
    assert_eq!(module.lookup("count").unwrap().kind, SymbolKind::Constant);
}

#[test]
fn test_module_and_routine_declarations() {
    let ast = parse(
        "IMPORT FGL lib\n\
         IMPORT util\n\
         GLOBALS\n  DEFINE g_user STRING\nEND GLOBALS\n\
         DEFINE m_count INTEGER\n\
         CONSTANT c_max = 10\n\
         TYPE t_rec RECORD\n  id INTEGER\nEND RECORD\n\
         FUNCTION f(p)\n  DEFINE p INTEGER\n  DEFINE loc STRING\n  LET loc = p\nEND FUNCTION\n\
         MAIN\n  DEFINE x INTEGER\n  LET x = 1\nEND MAIN\n",
    );
    let scope = ModuleScope::build(&ast);
    let module = scope.module();

    assert_eq!(
        module.lookup("lib").unwrap().kind,
        SymbolKind::Module(ImportKind::Fgl)
    );
    assert!(module.lookup("util").is_none());
    assert!(scope.imports_package("UTIL"));
    assert!(!scope.imports_package("os"));
    assert_eq!(module.lookup("g_user").unwrap().kind, SymbolKind::Variable);
    assert_eq!(module.lookup("M_COUNT").unwrap().kind, SymbolKind::Variable);
    assert_eq!(module.lookup("c_max").unwrap().kind, SymbolKind::Constant);
    assert_eq!(module.lookup("t_rec").unwrap().kind, SymbolKind::Type);
    assert_eq!(module.lookup("f").unwrap().kind, SymbolKind::Function);
    assert!(module.lookup("loc").is_none());

    // `loc` inside f sees the routine scope.
    let loc_use = find_name(&ast, "loc");
    let loc = scope.lookup(&ast, "loc", loc_use).unwrap();
    assert_eq!(loc.kind, SymbolKind::Variable);
    assert!(matches!(ast.kind(loc.decl), NodeKind::VarDef { .. }));

    // A legacy parameter typed by a later DEFINE resolves to the DEFINE.
    let p = scope.lookup(&ast, "p", loc_use).unwrap();
    assert_eq!(p.kind, SymbolKind::Variable);
    assert!(p.ty.is_some());

    // MAIN does not see f's locals.
    let x_use = find_name(&ast, "x");
    assert!(scope.lookup(&ast, "loc", x_use).is_none());
    assert!(scope.lookup(&ast, "x", x_use).is_some());
    assert!(scope.lookup(&ast, "m_count", x_use).is_some());
}

#[test]
fn test_typed_parameters() {
    let ast = parse("FUNCTION f(a INTEGER, b STRING)\n  RETURN a\nEND FUNCTION\n");
    let scope = ModuleScope::build(&ast);
    let a_use = find_name(&ast, "a");
    let a = scope.lookup(&ast, "A", a_use).unwrap();
    assert_eq!(a.kind, SymbolKind::Parameter);
    assert!(a.ty.is_some());
}

#[test]
fn test_cursor_declarations_are_module_wide() {
    let ast = parse(
        "FUNCTION a()\n  PREPARE s FROM \"SELECT 1\"\n  DECLARE Cur CURSOR FOR s\nEND FUNCTION\n\
         FUNCTION b()\n  OPEN cur\nEND FUNCTION\n",
    );
    let scope = ModuleScope::build(&ast);
    let cur = scope.cursor("CUR").unwrap();
    assert!(matches!(ast.kind(cur), NodeKind::Declare { .. }));
    let s = scope.cursor("s").unwrap();
    assert!(matches!(ast.kind(s), NodeKind::Prepare { .. }));
    assert!(scope.cursor("other").is_none());
}

#[test]
fn test_empty_module() {
    let ast = parse("");
    let scope = ModuleScope::build(&ast);
    assert_eq!(scope.module().names().count(), 0);
}
