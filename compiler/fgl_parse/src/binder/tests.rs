#![allow(clippy::unwrap_used, clippy::expect_used)]

use fgl_ir::Span;
use pretty_assertions::assert_eq;

use super::*;

fn ident(text: &str) -> Ident {
    Ident::new(text, Span::DUMMY)
}

#[test]
fn test_lookup_walks_outwards() {
    let mut binders = BinderStack::default();
    binders.push();
    binders.declare(&ident("c_cust"), NodeId::new(1));
    binders.push();
    assert_eq!(binders.lookup(&ident("C_CUST")), Some(NodeId::new(1)));
    binders.declare(&ident("c_cust"), NodeId::new(2));
    assert_eq!(binders.lookup(&ident("c_cust")), Some(NodeId::new(2)));
    binders.pop();
    assert_eq!(binders.lookup(&ident("c_cust")), Some(NodeId::new(1)));
    binders.pop();
    assert_eq!(binders.lookup(&ident("c_cust")), None);
}

#[test]
fn test_declare_without_frame_is_ignored() {
    let mut binders = BinderStack::default();
    binders.declare(&ident("s"), NodeId::new(0));
    assert_eq!(binders.lookup(&ident("s")), None);

    binders.push();
    binders.pop();
    binders.declare(&ident("s"), NodeId::new(0));
    assert_eq!(binders.lookup(&ident("s")), None);
}
