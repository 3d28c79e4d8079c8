#![allow(clippy::unwrap_used, clippy::expect_used)]

use fgl_ir::{Ast, LanguageVersion, NodeKind, Span};
use pretty_assertions::assert_eq;
use smallvec::smallvec;

use super::*;
use crate::builtins::{find_function, find_register};

#[test]
fn test_function_typed_variable_is_callable() {
    let mut ast = Ast::new(LanguageVersion::LATEST);
    let int = ast.alloc(
        NodeKind::ScalarType {
            kind: fgl_ir::ast::ScalarKind::Integer,
            qualifier: None,
        },
        Span::new(0, 3),
    );
    let fn_ty = ast.alloc(
        NodeKind::FunctionType {
            params: Vec::new(),
            returns: vec![int],
        },
        Span::new(0, 10),
    );
    let decl = ast.alloc(
        NodeKind::VarDef {
            names: Vec::new(),
            ty: Some(fn_ty),
        },
        Span::new(0, 10),
    );

    let callable = Resolution::Variable {
        decl,
        ty: Some(fn_ty),
    };
    assert_eq!(callable.return_count(&ast), Some(1));

    let plain = Resolution::Variable { decl, ty: Some(int) };
    assert_eq!(plain.return_count(&ast), None);
}

#[test]
fn test_array_type_is_not_callable() {
    let mut ast = Ast::new(LanguageVersion::LATEST);
    let array = ast.alloc(
        NodeKind::ArrayType {
            dynamic: true,
            bounds: smallvec![],
            element: None,
        },
        Span::new(0, 5),
    );
    let var = Resolution::Field {
        decl: array,
        ty: Some(array),
    };
    assert_eq!(var.return_count(&ast), None);
    assert!(var.is_storage());
}

#[test]
fn test_builtin_return_counts() {
    let ast = Ast::new(LanguageVersion::LATEST);
    let length = find_function("length", LanguageVersion::LATEST).unwrap();
    assert_eq!(
        Resolution::Builtin(Builtin::Function(length)).return_count(&ast),
        Some(1)
    );
    let external = Resolution::External(ExternalEntity::new(
        "lib.f",
        ExternalKind::Function { returns: 3 },
    ));
    assert_eq!(external.return_count(&ast), Some(3));
}

#[test]
fn test_storage_kinds() {
    let status = find_register("status", LanguageVersion::LATEST).unwrap();
    assert!(Resolution::Builtin(Builtin::Register(status)).is_storage());
    assert!(Resolution::External(ExternalEntity::new("g", ExternalKind::Variable)).is_storage());

    let mut ast = Ast::new(LanguageVersion::LATEST);
    let decl = ast.alloc(
        NodeKind::Label { name: None },
        Span::new(0, 1),
    );
    assert!(!Resolution::Constant { decl }.is_storage());
    assert!(!Resolution::Function { decl, returns: 0 }.is_storage());
    assert_eq!(Resolution::Function { decl, returns: 0 }.describe(), "function");
}

#[test]
fn test_builtin_entry_accessors() {
    let length = find_function("LENGTH", LanguageVersion::LATEST).unwrap();
    let builtin = Builtin::Function(length);
    assert_eq!(builtin.name(), "length");
    assert!(!builtin.doc().is_empty());
}

#[test]
fn test_external_origin() {
    let entity = ExternalEntity::new("f", ExternalKind::Function { returns: 1 }).with_origin("lib");
    assert_eq!(entity.origin.as_deref(), Some("lib"));
}
