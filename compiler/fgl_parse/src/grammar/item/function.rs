//! `MAIN`, `FUNCTION` and `REPORT` routines.

use fgl_ir::{
    Access, AttributeKind, FunctionKind, LanguageVersion, NodeId, NodeKind, Span, TokenKind,
};

use crate::context::ParseContext;
use crate::{ParseError, Parser};

/// Parsed `RETURNS` clause.
pub(crate) struct Returns {
    pub types: Vec<NodeId>,
    /// Single type without parentheses.
    pub bare: bool,
    pub closed: bool,
}

impl Parser<'_> {
    /// `MAIN statements END MAIN`
    pub(crate) fn main(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        let body = self.block(ParseContext::routine(TokenKind::Main));
        self.close_construct(NodeKind::Main { body }, start, TokenKind::Main)
    }

    /// `FUNCTION name(params) [RETURNS ...] statements END FUNCTION`, and the
    /// same shape for `REPORT`.
    pub(crate) fn function(&mut self, start: Span, access: Access) -> NodeId {
        let keyword = self.cursor.advance().kind;
        let kind = if keyword == TokenKind::Report {
            FunctionKind::Report
        } else {
            FunctionKind::Function
        };

        let name = self.declared_name();
        let headless = name.is_none();
        let (params, params_closed) = self.parameter_list();
        let returns = self.returns_clause();
        let body = self.block(ParseContext::routine(keyword));

        let node = NodeKind::Function {
            access,
            kind,
            name,
            params,
            returns: returns.types,
            body,
        };
        let id = self.close_construct(node, start, keyword);
        if returns.bare {
            self.ast.attributes.mark(id, AttributeKind::AltForm);
        }
        if !params_closed || !returns.closed {
            self.ast.attributes.mark(id, AttributeKind::MissingCloseGrouping);
        }
        if headless {
            self.mark_incomplete(id);
        }
        id
    }

    /// `( [param {, param}] )`; the flag is false when `)` was missing.
    pub(crate) fn parameter_list(&mut self) -> (Vec<NodeId>, bool) {
        let open = self.cursor.expect(TokenKind::LParen);
        if self.report(open).is_none() {
            return (Vec::new(), true);
        }
        let params = self.comma_list("parameter", false, Self::try_param);
        let closed = self.expect_closing(TokenKind::RParen, "parameter list");
        (params, closed)
    }

    /// `name [type]`; legacy routines leave parameter types to `DEFINE`.
    fn try_param(&mut self) -> Option<NodeId> {
        if !self.cursor.check_ident() {
            return None;
        }
        let start = self.current_span();
        let name = self.declared_name()?;
        let ty = match self.current_kind() {
            TokenKind::Comma | TokenKind::RParen => None,
            _ => self.try_type(),
        };
        Some(self.alloc(NodeKind::Param { name, ty }, start))
    }

    /// `RETURNS type` or `RETURNS ([type {, type}])`.
    pub(crate) fn returns_clause(&mut self) -> Returns {
        let Some(span) = self.eat(TokenKind::Returns) else {
            return Returns {
                types: Vec::new(),
                bare: false,
                closed: true,
            };
        };
        self.require_version(LanguageVersion::V3_00, "RETURNS clause", span);
        if self.eat(TokenKind::LParen).is_some() {
            let types = self.comma_list("return type", false, Self::try_type);
            let closed = self.expect_closing(TokenKind::RParen, "RETURNS list");
            return Returns {
                types,
                bare: false,
                closed,
            };
        }
        let types = self.expect_type("RETURNS").into_iter().collect();
        Returns {
            types,
            bare: true,
            closed: true,
        }
    }

    /// Consume a closing delimiter, reporting it missing otherwise.
    pub(crate) fn expect_closing(&mut self, closer: TokenKind, what: &str) -> bool {
        if self.eat(closer).is_some() {
            return true;
        }
        let closing = format!("`{}` to close the {what}", closer.display_name());
        self.error(
            ParseError::missing_close(&closing, self.is_at_end(), self.current_span())
                .with_context(format!("expected `{}`", closer.display_name())),
        );
        false
    }
}
