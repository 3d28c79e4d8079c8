#![allow(clippy::unwrap_used, clippy::expect_used)]

use fgl_diagnostic::ErrorCode;
use fgl_ir::{AttributeKind, LanguageVersion, NodeId, NodeKind, ScalarKind};
use pretty_assertions::assert_eq;

use crate::tests::{codes, find, parse_at, parse_latest};
use crate::ParseResult;

/// Parse `DEFINE v <ty>` and return the type node of `v`.
fn define_type(ty: &str) -> (ParseResult, NodeId) {
    let result = parse_latest(&format!("DEFINE v {ty}"));
    let def = find(&result.ast, |k| matches!(k, NodeKind::VarDef { .. })).unwrap();
    let NodeKind::VarDef { ty: Some(ty), .. } = result.ast.kind(def) else {
        panic!("no type parsed for `{ty}`: {:?}", result.errors);
    };
    let ty = *ty;
    (result, ty)
}

#[test]
fn test_scalar_types() {
    for (text, expected) in [
        ("INTEGER", ScalarKind::Integer),
        ("smallint", ScalarKind::SmallInt),
        ("STRING", ScalarKind::String),
        ("DATE", ScalarKind::Date),
        ("BOOLEAN", ScalarKind::Boolean),
    ] {
        let (result, ty) = define_type(text);
        assert!(!result.has_errors(), "{text}: {:?}", result.errors);
        assert!(
            matches!(result.ast.kind(ty), NodeKind::ScalarType { kind, qualifier: None } if *kind == expected),
            "{text}"
        );
    }
}

#[test]
fn test_size_qualifiers() {
    let (result, ty) = define_type("DECIMAL(10,2)");
    assert!(!result.has_errors(), "{:?}", result.errors);
    assert!(matches!(
        result.ast.kind(ty),
        NodeKind::ScalarType { kind: ScalarKind::Decimal, qualifier: Some(q) } if &**q == "(10,2)"
    ));

    let (result, ty) = define_type("CHAR(20)");
    assert!(matches!(
        result.ast.kind(ty),
        NodeKind::ScalarType { kind: ScalarKind::Char, qualifier: Some(q) } if &**q == "(20)"
    ));
}

#[test]
fn test_unclosed_size_qualifier() {
    let (result, ty) = define_type("VARCHAR(20");
    assert_eq!(codes(&result), vec![ErrorCode::E1003]);
    assert!(result.ast.attributes.missing_close_grouping(ty));
}

#[test]
fn test_datetime_qualifier() {
    let (result, ty) = define_type("DATETIME YEAR TO SECOND");
    assert!(!result.has_errors(), "{:?}", result.errors);
    assert!(matches!(
        result.ast.kind(ty),
        NodeKind::ScalarType { kind: ScalarKind::DateTime, qualifier: Some(q) } if &**q == "YEAR TO SECOND"
    ));

    let (result, _) = define_type("INTERVAL HOUR(2) TO FRACTION(3)");
    assert!(!result.has_errors(), "{:?}", result.errors);
}

#[test]
fn test_spelling_variants_are_kept() {
    let (result, ty) = define_type("DOUBLE PRECISION");
    assert!(matches!(
        result.ast.kind(ty),
        NodeKind::ScalarType {
            kind: ScalarKind::Float,
            ..
        }
    ));
    let names = result
        .ast
        .attributes
        .text_list(ty, AttributeKind::VerbatimNames);
    assert_eq!(names.len(), 2);
    assert_eq!(&*names[0], "DOUBLE");
    assert_eq!(&*names[1], "PRECISION");

    let (result, ty) = define_type("INT");
    let names = result
        .ast
        .attributes
        .text_list(ty, AttributeKind::VerbatimNames);
    assert_eq!(names.len(), 1);

    // Canonical spelling stores nothing.
    let (result, ty) = define_type("INTEGER");
    assert!(!result
        .ast
        .attributes
        .contains(ty, AttributeKind::VerbatimNames));
}

#[test]
fn test_named_types() {
    let (result, ty) = define_type("t_customer");
    assert!(matches!(result.ast.kind(ty), NodeKind::NamedType { path } if path.len() == 1));

    let (result, ty) = define_type("lib_common.t_customer");
    assert!(matches!(result.ast.kind(ty), NodeKind::NamedType { path } if path.len() == 2));

    // A scalar word followed by a dot is a qualified name.
    let (result, ty) = define_type("date.t_day");
    assert!(matches!(result.ast.kind(ty), NodeKind::NamedType { path } if path.len() == 2));
}

#[test]
fn test_like_types() {
    let (result, ty) = define_type("LIKE customer.cust_name");
    assert!(!result.has_errors(), "{:?}", result.errors);
    assert!(matches!(
        result.ast.kind(ty),
        NodeKind::LikeType { table: Some(_), column: Some(_) }
    ));

    let (result, ty) = define_type("RECORD LIKE customer.*");
    assert!(!result.has_errors(), "{:?}", result.errors);
    assert!(matches!(
        result.ast.kind(ty),
        NodeKind::LikeType { table: Some(_), column: None }
    ));
}

#[test]
fn test_record_type() {
    let (result, ty) = define_type("RECORD\n  id INTEGER,\n  name, city STRING\nEND RECORD");
    assert!(!result.has_errors(), "{:?}", result.errors);
    assert!(matches!(result.ast.kind(ty), NodeKind::RecordType { fields } if fields.len() == 2));
}

#[test]
fn test_record_missing_end() {
    let result = parse_latest("DEFINE r RECORD\n  id INTEGER\nMAIN\nEND MAIN");
    assert_eq!(codes(&result), vec![ErrorCode::E1003]);
    assert_eq!(result.errors[0].message, "missing END RECORD");
    let record = find(&result.ast, |k| matches!(k, NodeKind::RecordType { .. })).unwrap();
    assert!(!result.ast.is_complete(record));
}

#[test]
fn test_static_arrays() {
    let (result, ty) = define_type("ARRAY[10, 20] OF STRING");
    assert!(!result.has_errors(), "{:?}", result.errors);
    let NodeKind::ArrayType {
        dynamic,
        bounds,
        element,
    } = result.ast.kind(ty)
    else {
        unreachable!()
    };
    assert!(!dynamic);
    assert_eq!(bounds.as_slice(), &[10, 20]);
    assert!(element.is_some());
}

#[test]
fn test_dynamic_arrays() {
    let (result, ty) = define_type("DYNAMIC ARRAY WITH DIMENSION 2 OF INTEGER");
    assert!(!result.has_errors(), "{:?}", result.errors);
    assert!(matches!(
        result.ast.kind(ty),
        NodeKind::ArrayType { dynamic: true, bounds, element: Some(_) } if bounds.as_slice() == [2]
    ));

    let (result, ty) = define_type("ARRAY[] OF INTEGER");
    assert!(!result.has_errors(), "{:?}", result.errors);
    assert!(matches!(
        result.ast.kind(ty),
        NodeKind::ArrayType { dynamic: true, bounds, .. } if bounds.is_empty()
    ));
}

#[test]
fn test_dynamic_array_spacing() {
    let (result, ty) = define_type("DYNAMIC  ARRAY OF INTEGER");
    assert_eq!(result.ast.attributes.preceding_whitespace(ty, 1), "  ");
}

#[test]
fn test_non_literal_array_bound() {
    let (result, _) = define_type("ARRAY[n] OF INTEGER");
    assert_eq!(codes(&result), vec![ErrorCode::E1010]);
}

#[test]
fn test_array_without_element_type() {
    let (result, ty) = define_type("ARRAY[3] OF");
    assert_eq!(codes(&result), vec![ErrorCode::E1005]);
    assert!(!result.ast.is_complete(ty));
}

#[test]
fn test_dictionary_type() {
    let (result, ty) = define_type("DICTIONARY OF RECORD LIKE customer.*");
    assert!(!result.has_errors(), "{:?}", result.errors);
    assert!(matches!(
        result.ast.kind(ty),
        NodeKind::DictionaryType { value: Some(_) }
    ));
}

#[test]
fn test_function_type_gate() {
    let source = "TYPE t_callback FUNCTION(a INTEGER) RETURNS BOOLEAN";
    assert!(!parse_latest(source).has_errors());
    let old = parse_at(source, LanguageVersion::V3_10);
    assert_eq!(codes(&old), vec![ErrorCode::E1009]);
    assert!(find(&old.ast, |k| matches!(k, NodeKind::FunctionType { params, .. } if params.len() == 1)).is_some());
}
