//! `DEFINE`, `CONSTANT` and `TYPE` declarations.
//!
//! The same productions serve module level, `GLOBALS` blocks, routine
//! bodies and `RECORD` members.

use fgl_diagnostic::ErrorCode;
use fgl_ir::{Access, AttributeKind, AttributeValue, Ident, NodeId, NodeKind, Span, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `DEFINE var_def {, var_def}`
    pub(crate) fn define(&mut self, start: Span, access: Access) -> NodeId {
        self.cursor.advance();
        let vars = self.comma_list("variable definition", true, Self::try_var_def);
        let empty = vars.is_empty();
        let id = self.alloc(NodeKind::Define { access, vars }, start);
        if empty {
            self.mark_incomplete(id);
        }
        id
    }

    /// `name {, name} type`
    ///
    /// A comma directly after a name continues the name list; a comma after
    /// the type starts the next definition.
    pub(crate) fn try_var_def(&mut self) -> Option<NodeId> {
        if !self.cursor.check_ident() {
            return None;
        }
        let start = self.current_span();
        let mut names = Vec::new();
        let mut gaps: Vec<Box<str>> = Vec::new();
        names.push(self.declared_name()?);
        while self.eat(TokenKind::Comma).is_some() {
            gaps.push(self.gap_before_current().into());
            match self.declared_name() {
                Some(name) => names.push(name),
                None => break,
            }
        }

        let ty = self.try_type();
        if ty.is_none() {
            let listed = names
                .iter()
                .map(Ident::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            self.error(
                ParseError::new(
                    ErrorCode::E1005,
                    format!(
                        "expected type for {listed}, found {}",
                        self.current_kind().display_name()
                    ),
                    self.current_span(),
                )
                .with_context("expected a type"),
            );
        }

        let id = self.alloc(NodeKind::VarDef { names, ty }, start);
        if ty.is_none() {
            self.mark_incomplete(id);
        }
        if gaps.iter().any(|gap| &**gap != " ") {
            self.set_attribute(id, AttributeKind::ListWhitespace, AttributeValue::TextList(gaps));
        }
        Some(id)
    }

    /// `CONSTANT name [type] = value {, ...}`
    pub(crate) fn constant(&mut self, start: Span, access: Access) -> NodeId {
        self.cursor.advance();
        let defs = self.comma_list("constant definition", true, Self::try_const_def);
        let empty = defs.is_empty();
        let id = self.alloc(NodeKind::Constant { access, defs }, start);
        if empty {
            self.mark_incomplete(id);
        }
        id
    }

    fn try_const_def(&mut self) -> Option<NodeId> {
        if !self.cursor.check_ident() {
            return None;
        }
        let start = self.current_span();
        let name = self.declared_name()?;
        let ty = if self.check(TokenKind::Eq) {
            None
        } else {
            self.try_type()
        };
        let has_eq = {
            let result = self.cursor.expect(TokenKind::Eq);
            self.report(result).is_some()
        };
        let value = if has_eq {
            self.expect_expr("constant value")
        } else {
            None
        };
        let id = self.alloc(NodeKind::ConstDef { name, ty, value }, start);
        if value.is_none() {
            self.mark_incomplete(id);
        }
        Some(id)
    }

    /// `TYPE name type {, ...}`
    pub(crate) fn type_decl(&mut self, start: Span, access: Access) -> NodeId {
        self.cursor.advance();
        let defs = self.comma_list("type definition", true, Self::try_type_def);
        let empty = defs.is_empty();
        let id = self.alloc(NodeKind::TypeDecl { access, defs }, start);
        if empty {
            self.mark_incomplete(id);
        }
        id
    }

    fn try_type_def(&mut self) -> Option<NodeId> {
        if !self.cursor.check_ident() {
            return None;
        }
        let start = self.current_span();
        let name = self.declared_name()?;
        let ty = self.expect_type(name.as_str());
        let id = self.alloc(NodeKind::TypeDef { name, ty }, start);
        if ty.is_none() {
            self.mark_incomplete(id);
        }
        Some(id)
    }
}
