#![allow(clippy::unwrap_used, clippy::expect_used)]

use fgl_ir::{Ast, LanguageVersion, NodeId, NodeKind, ScalarKind};
use pretty_assertions::assert_eq;

use super::*;
use crate::builtins::find_class;
use crate::scope::{ModuleScope, Symbol, SymbolKind};
use crate::tests::{find_node, parse, parse_at};

/// Named types through the module scope and the built-in classes.
struct Names<'a> {
    ast: &'a Ast,
    scope: ModuleScope,
}

impl<'a> Names<'a> {
    fn new(ast: &'a Ast) -> Self {
        Names {
            ast,
            scope: ModuleScope::build(ast),
        }
    }
}

impl TypeNames for Names<'_> {
    fn resolve_type(&self, path: &[Ident], at: NodeId) -> Option<NamedTarget> {
        match path {
            [name] => match self.scope.lookup(self.ast, &name.text, at)? {
                Symbol {
                    kind: SymbolKind::Type,
                    ty: Some(ty),
                    ..
                } => Some(NamedTarget::Node(ty)),
                _ => None,
            },
            [package, class] => find_class(&package.text, &class.text, self.ast.version())
                .map(NamedTarget::Class),
            _ => None,
        }
    }
}

/// Type node of the variable `name`.
fn var_type<'a>(ast: &'a Ast, name: &str) -> TypeRef<'a> {
    let def = find_node(ast, |k| {
        matches!(k, NodeKind::VarDef { names, .. } if names.iter().any(|n| n.is(name)))
    });
    let NodeKind::VarDef { ty: Some(ty), .. } = ast.kind(def) else {
        panic!("`{name}` has no type");
    };
    TypeRef::new(ast, *ty).unwrap()
}

fn member_names(members: &[Member]) -> Vec<&str> {
    members.iter().map(Member::name).collect()
}

fn field_or_method(lookup: MemberLookup) -> &'static str {
    match lookup {
        MemberLookup::Found(Member::Field { .. }) => "field",
        MemberLookup::Found(Member::Method(_)) => "method",
        MemberLookup::Missing => "missing",
        MemberLookup::Opaque => "opaque",
    }
}

#[test]
fn test_dictionary_of_integer() {
    let ast = parse("DEFINE d DICTIONARY OF INTEGER");
    let names = Names::new(&ast);
    let dict = var_type(&ast, "d");

    assert_eq!(ast.children(dict.id()).len(), 1);
    let element = dict.element().unwrap();
    assert!(matches!(
        element.kind(),
        NodeKind::ScalarType {
            kind: ScalarKind::Integer,
            ..
        }
    ));

    let members = dict.members(MemberMode::Value, MemberKinds::ALL, &names);
    let expected: Vec<&str> = methods_for(Receiver::Dictionary, LanguageVersion::LATEST)
        .map(|m| m.name)
        .collect();
    assert_eq!(member_names(&members), expected);
    assert!(dict
        .members(MemberMode::ArrayElement, MemberKinds::ALL, &names)
        .is_empty());
}

#[test]
fn test_dictionary_methods_follow_version() {
    let ast = parse_at("DEFINE d DICTIONARY OF STRING", LanguageVersion::V3_10);
    let names = Names::new(&ast);
    let dict = var_type(&ast, "d");
    let methods: Vec<Member> = dict
        .members(MemberMode::Value, MemberKinds::METHOD, &names)
        .into_iter()
        .filter(|m| matches!(m, Member::Method(Builtin::Method(_))))
        .collect();
    let names_at_3_10 = member_names(&methods);
    assert!(!names_at_3_10.contains(&"copyTo"));
    assert!(names_at_3_10.contains(&"getKeys"));
    // The string element offers its own methods in value mode.
    assert_eq!(
        field_or_method(dict.lookup_member("toUpperCase", MemberMode::Value, MemberKinds::ALL, &names)),
        "method"
    );
}

#[test]
fn test_array_of_records() {
    let ast = parse("DEFINE a DYNAMIC ARRAY OF RECORD\n  x INTEGER,\n  y STRING\nEND RECORD");
    let names = Names::new(&ast);
    let array = var_type(&ast, "a");
    assert!(array.is_collection());

    let lookup = |name, mode| field_or_method(array.lookup_member(name, mode, MemberKinds::ALL, &names));
    assert_eq!(lookup("getLength", MemberMode::Value), "method");
    assert_eq!(lookup("getLength", MemberMode::ArrayElement), "missing");
    assert_eq!(lookup("Y", MemberMode::ArrayElement), "field");
    assert_eq!(lookup("x", MemberMode::Value), "field");
    assert_eq!(lookup("z", MemberMode::ArrayElement), "missing");

    let only_fields = array.members(MemberMode::ArrayElement, MemberKinds::VARIABLE, &names);
    assert_eq!(member_names(&only_fields), vec!["x", "y"]);
}

#[test]
fn test_method_kind_filter() {
    let ast = parse("DEFINE a DYNAMIC ARRAY OF INTEGER");
    let names = Names::new(&ast);
    let array = var_type(&ast, "a");
    assert_eq!(
        field_or_method(array.lookup_member("getLength", MemberMode::Value, MemberKinds::VARIABLE, &names)),
        "missing"
    );
}

#[test]
fn test_named_types_are_followed() {
    let ast = parse(
        "TYPE t_rec RECORD\n  x INTEGER\nEND RECORD\n\
         TYPE t_alias t_rec\n\
         DEFINE r t_alias",
    );
    let names = Names::new(&ast);
    let r = var_type(&ast, "r");
    assert!(matches!(r.kind(), NodeKind::NamedType { .. }));
    assert_eq!(
        field_or_method(r.lookup_member("x", MemberMode::Value, MemberKinds::ALL, &names)),
        "field"
    );
    assert!(matches!(
        r.resolve(&names).map(TypeRef::kind),
        Some(NodeKind::RecordType { .. })
    ));
}

#[test]
fn test_alias_cycle_is_opaque() {
    let ast = parse("TYPE t_a t_b\nTYPE t_b t_a\nDEFINE v t_a");
    let names = Names::new(&ast);
    let v = var_type(&ast, "v");
    assert_eq!(
        v.lookup_member("x", MemberMode::Value, MemberKinds::ALL, &names),
        MemberLookup::Opaque
    );
    assert!(v.members(MemberMode::Value, MemberKinds::ALL, &names).is_empty());
}

#[test]
fn test_like_types_are_opaque() {
    let ast = parse("DEFINE r RECORD LIKE customer.*");
    let names = Names::new(&ast);
    let r = var_type(&ast, "r");
    assert_eq!(
        r.lookup_member("cust_name", MemberMode::Value, MemberKinds::ALL, &names),
        MemberLookup::Opaque
    );
}

#[test]
fn test_class_objects_expose_object_methods() {
    let ast = parse("DEFINE ch base.Channel");
    let names = Names::new(&ast);
    let ch = var_type(&ast, "ch");
    let lookup = |name| field_or_method(ch.lookup_member(name, MemberMode::Value, MemberKinds::ALL, &names));
    assert_eq!(lookup("readLine"), "method");
    // `create` is called on the class, not on an object.
    assert_eq!(lookup("create"), "missing");
}

#[test]
fn test_function_type_return_count() {
    let ast = parse("TYPE t_cb FUNCTION(a INTEGER) RETURNS (INTEGER, STRING)");
    let id = find_node(&ast, |k| matches!(k, NodeKind::FunctionType { .. }));
    assert_eq!(TypeRef::new(&ast, id).unwrap().return_count(), Some(2));

    let scalar = find_node(&ast, |k| matches!(k, NodeKind::ScalarType { .. }));
    assert_eq!(TypeRef::new(&ast, scalar).unwrap().return_count(), None);
}

#[test]
fn test_new_rejects_non_type_nodes() {
    let ast = parse("DEFINE v INTEGER");
    let def = find_node(&ast, |k| matches!(k, NodeKind::VarDef { .. }));
    assert!(TypeRef::new(&ast, def).is_none());
}
