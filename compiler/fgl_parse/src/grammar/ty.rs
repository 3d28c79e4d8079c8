//! Type references.
//!
//! Scalar type names are plain identifiers to the lexer (`INTEGER` may also
//! name a variable), so a type is recognised by position: whatever follows
//! the names in a definition.

use fgl_diagnostic::ErrorCode;
use fgl_ir::{
    AttributeKind, AttributeValue, Ident, LanguageVersion, NodeId, NodeKind, ScalarKind, Span,
    TokenKind,
};
use smallvec::SmallVec;

use crate::{ParseError, Parser};

/// Words allowed in `DATETIME` and `INTERVAL` qualifiers.
const TIME_UNITS: &[&str] = &["year", "month", "day", "hour", "minute", "second", "fraction"];

impl Parser<'_> {
    /// Parse a type if one starts here.
    pub(crate) fn try_type(&mut self) -> Option<NodeId> {
        fgl_stack::ensure_sufficient_stack(|| self.try_type_inner())
    }

    fn try_type_inner(&mut self) -> Option<NodeId> {
        let start = self.current_span();
        let id = match self.current_kind() {
            TokenKind::Ident => self.scalar_or_named_type(start),
            TokenKind::Record => self.record_type(start),
            TokenKind::Array => self.array_type(start, false),
            TokenKind::Dynamic => self.array_type(start, true),
            TokenKind::Dictionary => self.dictionary_type(start),
            TokenKind::Function => self.function_type(start),
            TokenKind::Like => {
                self.cursor.advance();
                self.like_type(start)
            }
            _ => return None,
        };
        Some(id)
    }

    /// Parse a required type, reporting it missing for `what`.
    pub(crate) fn expect_type(&mut self, what: &str) -> Option<NodeId> {
        let ty = self.try_type();
        if ty.is_none() {
            self.error(
                ParseError::new(
                    ErrorCode::E1005,
                    format!(
                        "expected type for {what}, found {}",
                        self.current_kind().display_name()
                    ),
                    self.current_span(),
                )
                .with_context("expected a type"),
            );
        }
        ty
    }

    fn scalar_or_named_type(&mut self, start: Span) -> NodeId {
        let token = self.cursor.advance();
        let kind = match ScalarKind::from_word(&token.image) {
            Some(kind) if !self.check(TokenKind::Dot) => kind,
            _ => return self.named_type(start, Ident::new(&*token.image, token.span)),
        };

        let mut spelling: Vec<Box<str>> = vec![token.image.clone()];
        if token.is_word("double") {
            if let Some(span) = self.cursor.eat_word("precision") {
                spelling.push(self.source_text(span).into());
            }
        }

        let mut closed = true;
        let qualifier_start = self.current_span();
        let qualified = match kind {
            ScalarKind::DateTime | ScalarKind::Interval => self.time_qualifier(),
            _ if self.check(TokenKind::LParen) => {
                closed = self.size_qualifier();
                true
            }
            _ => false,
        };
        let qualifier = qualified.then(|| self.source_text(self.span_from(qualifier_start)).into());

        let id = self.finish(NodeKind::ScalarType { kind, qualifier }, start, closed);
        let verbatim = spelling.len() > 1 || &*spelling[0] != kind.name();
        if verbatim {
            self.set_attribute(id, AttributeKind::VerbatimNames, AttributeValue::TextList(spelling));
        }
        id
    }

    /// `(n)` or `(p, s)`; false when `)` is missing.
    fn size_qualifier(&mut self) -> bool {
        self.cursor.advance();
        self.comma_list("size", true, |p| {
            p.check(TokenKind::Int).then(|| p.cursor.advance().span)
        });
        self.expect_closing(TokenKind::RParen, "type size")
    }

    /// `unit [(n)] TO unit [(n)]`
    fn time_qualifier(&mut self) -> bool {
        if !self.at_time_unit() {
            return false;
        }
        self.time_unit();
        let to = self.cursor.expect(TokenKind::To);
        if self.report(to).is_some() {
            if self.at_time_unit() {
                self.time_unit();
            } else {
                let error = self.cursor.make_expect_error("time unit");
                self.error(error);
            }
        }
        true
    }

    fn at_time_unit(&self) -> bool {
        TIME_UNITS.iter().any(|unit| self.cursor.check_word(unit))
    }

    fn time_unit(&mut self) {
        self.cursor.advance();
        if self.eat(TokenKind::LParen).is_some() {
            let digits = self.cursor.expect(TokenKind::Int);
            self.report(digits);
            self.expect_closing(TokenKind::RParen, "time unit precision");
        }
    }

    /// `name {. name}`: a user type, possibly module- or package-qualified.
    fn named_type(&mut self, start: Span, first: Ident) -> NodeId {
        let mut path = vec![first];
        while self.eat(TokenKind::Dot).is_some() {
            match self.cursor.expect_ident_or_keyword() {
                Ok(segment) => path.push(segment),
                Err(error) => {
                    self.error(error);
                    let id = self.alloc(NodeKind::NamedType { path }, start);
                    self.mark_incomplete(id);
                    return id;
                }
            }
        }
        self.alloc(NodeKind::NamedType { path }, start)
    }

    /// `RECORD fields END RECORD` or `RECORD LIKE table.*`.
    fn record_type(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        if self.eat(TokenKind::Like).is_some() {
            return self.like_type(start);
        }
        let fields = self.comma_list("record member", true, Self::try_var_def);
        self.close_construct(NodeKind::RecordType { fields }, start, TokenKind::Record)
    }

    /// `table.column` or `table.*` after `LIKE`.
    fn like_type(&mut self, start: Span) -> NodeId {
        let table = self.declared_name();
        let mut column = None;
        let mut complete = table.is_some();
        if complete {
            let dot = self.cursor.expect(TokenKind::Dot);
            if self.report(dot).is_some() {
                if self.eat(TokenKind::Star).is_none() {
                    let result = self.cursor.expect_ident_or_keyword();
                    column = self.report(result);
                    complete = column.is_some();
                }
            } else {
                complete = false;
            }
        }
        let id = self.alloc(NodeKind::LikeType { table, column }, start);
        if !complete {
            self.mark_incomplete(id);
        }
        id
    }

    /// `ARRAY [n {, n}] OF type` or `DYNAMIC ARRAY [WITH DIMENSION n] OF type`.
    fn array_type(&mut self, start: Span, dynamic: bool) -> NodeId {
        self.cursor.advance();
        let mut bounds: SmallVec<[u32; 3]> = SmallVec::new();
        let mut closed = true;
        let mut dynamic = dynamic;

        if dynamic {
            let gap = self.gap_before_current();
            let array = self.cursor.expect(TokenKind::Array);
            self.report(array);
            if self.check(TokenKind::With) && self.cursor.peek_at(1).is_word("dimension") {
                self.cursor.advance();
                self.cursor.advance();
                if let Some(n) = self.array_bound() {
                    bounds.push(n);
                }
            }
            let id = self.array_element(start, dynamic, bounds, closed);
            self.ast.attributes.set_preceding_whitespace(id, 1, gap);
            return id;
        }

        let open = self.cursor.expect(TokenKind::LBracket);
        if self.report(open).is_some() {
            if self.check(TokenKind::RBracket) {
                // `ARRAY[] OF`: an unbounded Java-style array.
                dynamic = true;
            } else {
                for bound in self.comma_list("array dimension", true, Self::array_bound) {
                    bounds.push(bound);
                }
            }
            closed = self.expect_closing(TokenKind::RBracket, "array dimensions");
        }
        self.array_element(start, dynamic, bounds, closed)
    }

    fn array_bound(&mut self) -> Option<u32> {
        let token = self.cursor.current();
        if token.kind != TokenKind::Int {
            if !crate::recovery::EXPR_START.contains(token.kind) {
                return None;
            }
            self.cursor.advance();
            self.error(
                ParseError::new(
                    ErrorCode::E1010,
                    "array dimension must be an integer literal",
                    token.span,
                )
                .with_context("expected an integer"),
            );
            return Some(0);
        }
        self.cursor.advance();
        match token.image.parse::<u32>() {
            Ok(n) => Some(n),
            Err(_) => {
                self.error(ParseError::new(
                    ErrorCode::E1010,
                    format!("array dimension `{}` is out of range", token.image),
                    token.span,
                ));
                Some(0)
            }
        }
    }

    fn array_element(
        &mut self,
        start: Span,
        dynamic: bool,
        bounds: SmallVec<[u32; 3]>,
        closed: bool,
    ) -> NodeId {
        let of = self.cursor.expect(TokenKind::Of);
        let element = if self.report(of).is_some() {
            self.expect_type("array element")
        } else {
            None
        };
        let missing = element.is_none();
        let id = self.finish(
            NodeKind::ArrayType {
                dynamic,
                bounds,
                element,
            },
            start,
            closed,
        );
        if missing {
            self.mark_incomplete(id);
        }
        id
    }

    /// `DICTIONARY OF type`
    fn dictionary_type(&mut self, start: Span) -> NodeId {
        let keyword = self.cursor.advance().span;
        self.require_version(LanguageVersion::V3_10, "DICTIONARY type", keyword);
        let of = self.cursor.expect(TokenKind::Of);
        let value = if self.report(of).is_some() {
            self.expect_type("dictionary element")
        } else {
            None
        };
        let id = self.alloc(NodeKind::DictionaryType { value }, start);
        if value.is_none() {
            self.mark_incomplete(id);
        }
        id
    }

    /// `FUNCTION (params) [RETURNS ...]`
    fn function_type(&mut self, start: Span) -> NodeId {
        let keyword = self.cursor.advance().span;
        self.require_version(LanguageVersion::V3_20, "function type", keyword);
        let (params, params_closed) = self.parameter_list();
        let returns = self.returns_clause();
        let id = self.finish(
            NodeKind::FunctionType {
                params,
                returns: returns.types,
            },
            start,
            params_closed && returns.closed,
        );
        if returns.bare {
            self.ast.attributes.mark(id, AttributeKind::AltForm);
        }
        id
    }
}

#[cfg(test)]
mod tests;
