#![allow(clippy::unwrap_used, clippy::expect_used)]

use fgl_diagnostic::ErrorCode;
use fgl_ir::{BinaryOp, LiteralKind, NameSuffix, NodeId, NodeKind, UnaryOp};
use pretty_assertions::assert_eq;

use crate::tests::{codes, find, parse_latest};
use crate::ParseResult;

/// Parse `LET x = <expr>` and return the value node.
fn let_value(expr: &str) -> (ParseResult, NodeId) {
    let result = parse_latest(&format!("MAIN\n  LET x = {expr}\nEND MAIN"));
    let let_id = find(&result.ast, |k| matches!(k, NodeKind::Let { .. })).unwrap();
    let NodeKind::Let { values, .. } = result.ast.kind(let_id) else {
        unreachable!()
    };
    let value = values[0];
    (result, value)
}

fn binary(result: &ParseResult, id: NodeId) -> (BinaryOp, NodeId, Option<NodeId>) {
    match result.ast.kind(id) {
        NodeKind::Binary { op, lhs, rhs } => (*op, *lhs, *rhs),
        other => panic!("expected binary expression, got {other:?}"),
    }
}

#[test]
fn test_multiplication_binds_tighter() {
    let (result, id) = let_value("1 + 2 * 3");
    assert!(!result.has_errors());
    let (op, lhs, rhs) = binary(&result, id);
    assert_eq!(op, BinaryOp::Add);
    assert!(matches!(
        result.ast.kind(lhs),
        NodeKind::Literal {
            kind: LiteralKind::Int,
            ..
        }
    ));
    assert_eq!(binary(&result, rhs.unwrap()).0, BinaryOp::Mul);
}

#[test]
fn test_additive_is_left_associative() {
    let (result, id) = let_value("a - b - c");
    let (op, lhs, _) = binary(&result, id);
    assert_eq!(op, BinaryOp::Sub);
    assert_eq!(binary(&result, lhs).0, BinaryOp::Sub);
}

#[test]
fn test_power_is_right_associative() {
    let (result, id) = let_value("2 ** 3 ** 2");
    let (op, lhs, rhs) = binary(&result, id);
    assert_eq!(op, BinaryOp::Pow);
    assert!(matches!(result.ast.kind(lhs), NodeKind::Literal { .. }));
    assert_eq!(binary(&result, rhs.unwrap()).0, BinaryOp::Pow);
}

#[test]
fn test_logical_precedence() {
    let (result, id) = let_value("a = 1 OR b = 2 AND NOT c");
    let (op, lhs, rhs) = binary(&result, id);
    assert_eq!(op, BinaryOp::Or);
    assert_eq!(binary(&result, lhs).0, BinaryOp::Eq);
    let (and, _, not) = binary(&result, rhs.unwrap());
    assert_eq!(and, BinaryOp::And);
    assert!(matches!(
        result.ast.kind(not.unwrap()),
        NodeKind::Unary {
            op: UnaryOp::Not,
            operand: Some(_)
        }
    ));
}

#[test]
fn test_concat_below_additive() {
    let (result, id) = let_value("a || b + 1");
    let (op, _, rhs) = binary(&result, id);
    assert_eq!(op, BinaryOp::Concat);
    assert_eq!(binary(&result, rhs.unwrap()).0, BinaryOp::Add);
}

#[test]
fn test_comparison_alt_forms() {
    let (result, id) = let_value("a == b");
    assert_eq!(binary(&result, id).0, BinaryOp::Eq);
    assert!(result.ast.attributes.is_alt_form(id));

    let (result, id) = let_value("a <> b");
    assert_eq!(binary(&result, id).0, BinaryOp::NotEq);
    assert!(result.ast.attributes.is_alt_form(id));

    let (result, id) = let_value("a != b");
    assert!(!result.ast.attributes.is_alt_form(id));
}

#[test]
fn test_negated_pattern_operators() {
    let (result, id) = let_value("name NOT LIKE \"A%\"");
    assert!(!result.has_errors(), "{:?}", result.errors);
    assert_eq!(binary(&result, id).0, BinaryOp::NotLike);

    let (result, id) = let_value("name MATCHES \"A*\"");
    assert_eq!(binary(&result, id).0, BinaryOp::Matches);
}

#[test]
fn test_is_null() {
    let (result, id) = let_value("a IS NOT NULL");
    assert!(!result.has_errors(), "{:?}", result.errors);
    assert!(matches!(
        result.ast.kind(id),
        NodeKind::IsNull { negated: true, .. }
    ));

    let (result, id) = let_value("a IS NULL AND b");
    let (op, lhs, _) = binary(&result, id);
    assert_eq!(op, BinaryOp::And);
    assert!(matches!(
        result.ast.kind(lhs),
        NodeKind::IsNull { negated: false, .. }
    ));
}

#[test]
fn test_unary_minus() {
    let (result, id) = let_value("-a * 2");
    let (op, lhs, _) = binary(&result, id);
    assert_eq!(op, BinaryOp::Mul);
    assert!(matches!(
        result.ast.kind(lhs),
        NodeKind::Unary {
            op: UnaryOp::Neg,
            ..
        }
    ));
}

#[test]
fn test_postfix_operators() {
    let (result, id) = let_value("name CLIPPED || amount USING \"###.##\"");
    assert!(!result.has_errors(), "{:?}", result.errors);
    let (op, lhs, rhs) = binary(&result, id);
    assert_eq!(op, BinaryOp::Concat);
    assert!(matches!(result.ast.kind(lhs), NodeKind::Clipped { .. }));
    assert!(matches!(
        result.ast.kind(rhs.unwrap()),
        NodeKind::Using { format: Some(_), .. }
    ));
}

#[test]
fn test_using_format_may_be_signed() {
    let result = parse_latest("MAIN\n  DISPLAY x USING -1\nEND MAIN");
    assert!(!result.has_errors(), "{:?}", result.errors);
    let using = find(&result.ast, |k| matches!(k, NodeKind::Using { .. })).unwrap();
    let NodeKind::Using { format, .. } = result.ast.kind(using) else {
        unreachable!()
    };
    assert!(matches!(
        result.ast.kind(format.unwrap()),
        NodeKind::Unary {
            op: UnaryOp::Neg,
            operand: Some(_)
        }
    ));

    let (result, id) = let_value("amount USING \"##\" CLIPPED");
    assert!(!result.has_errors(), "{:?}", result.errors);
    assert!(matches!(result.ast.kind(id), NodeKind::Clipped { .. }));
}

#[test]
fn test_string_literal_value_is_unquoted() {
    let (result, id) = let_value("'single'");
    assert!(matches!(
        result.ast.kind(id),
        NodeKind::Literal { kind: LiteralKind::String, value } if &**value == "single"
    ));

    let (result, id) = let_value("\"a\\tb\"");
    assert!(matches!(
        result.ast.kind(id),
        NodeKind::Literal { kind: LiteralKind::String, value } if &**value == "a\tb"
    ));
}

#[test]
fn test_missing_right_operand() {
    let (result, id) = let_value("1 +");
    assert_eq!(codes(&result), vec![ErrorCode::E1002]);
    assert_eq!(result.errors[0].message, "expected expression after +, found END");
    let (_, _, rhs) = binary(&result, id);
    assert!(rhs.is_none());
    assert!(!result.ast.is_complete(id));
}

#[test]
fn test_unclosed_paren() {
    let (result, id) = let_value("(1 + 2");
    assert_eq!(codes(&result), vec![ErrorCode::E1003]);
    assert!(matches!(result.ast.kind(id), NodeKind::Paren { inner: Some(_) }));
    assert!(result.ast.attributes.missing_close_grouping(id));
}

#[test]
fn test_name_suffixes() {
    let (result, id) = let_value("r.items[i, 2].name");
    assert!(!result.has_errors(), "{:?}", result.errors);
    let NodeKind::Name { base, suffixes } = result.ast.kind(id) else {
        unreachable!()
    };
    assert!(base.is("r"));
    assert_eq!(suffixes.len(), 3);
    assert!(matches!(&suffixes[0], NameSuffix::Member(m) if m.is("items")));
    assert!(matches!(&suffixes[1], NameSuffix::Index(ix) if ix.len() == 2));
    assert!(matches!(&suffixes[2], NameSuffix::Member(m) if m.is("name")));
}

#[test]
fn test_method_call_with_keyword_member() {
    let (result, id) = let_value("ch.close()");
    assert!(!result.has_errors(), "{:?}", result.errors);
    assert!(matches!(
        result.ast.kind(id),
        NodeKind::Name { suffixes, .. }
            if matches!(suffixes.as_slice(), [NameSuffix::Member(_), NameSuffix::Call(args)] if args.is_empty())
    ));
}

#[test]
fn test_function_call_arguments() {
    let (result, id) = let_value("length(s CLIPPED) + f(1, 2, 3)");
    assert!(!result.has_errors(), "{:?}", result.errors);
    let (_, _, rhs) = binary(&result, id);
    assert!(matches!(
        result.ast.kind(rhs.unwrap()),
        NodeKind::Name { suffixes, .. }
            if matches!(suffixes.as_slice(), [NameSuffix::Call(args)] if args.len() == 3)
    ));
}

#[test]
fn test_empty_index_is_reported() {
    let (result, id) = let_value("arr[]");
    assert_eq!(codes(&result), vec![ErrorCode::E1007]);
    assert!(!result.ast.is_complete(id));
}

#[test]
fn test_unclosed_index() {
    let (result, id) = let_value("arr[1");
    assert_eq!(codes(&result), vec![ErrorCode::E1003]);
    assert!(result.ast.attributes.missing_close_grouping(id));
}

#[test]
fn test_spans_cover_operands() {
    let source = "MAIN\n  LET x = a + b\nEND MAIN";
    let (result, id) = let_value("a + b");
    let span = result.ast.span(id);
    assert_eq!(&source[span.to_range()], "a + b");
}
