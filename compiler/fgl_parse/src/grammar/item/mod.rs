//! Module-level items.
//!
//! - `decl.rs`: `DEFINE`, `CONSTANT` and `TYPE` declarations (also statements)
//! - `function.rs`: `MAIN`, `FUNCTION` and `REPORT`

mod decl;
mod function;

use fgl_diagnostic::ErrorCode;
use fgl_ir::{
    Access, AttributeKind, AttributeValue, Ident, ImportKind, NodeId, NodeKind, Span, TokenKind,
};

use crate::context::ParseContext;
use crate::recovery::{synchronize, ITEM_START};
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse the whole token stream into a `Module` node.
    pub(crate) fn module(&mut self) -> NodeId {
        let mut items = Vec::new();
        while !self.is_at_end() {
            let region = self.pending_region();
            let pos = self.cursor.position();
            if self.check(TokenKind::End) {
                self.stray_end(items.last().copied());
                continue;
            }
            if let Some(item) = self.item() {
                if let Some(name) = region {
                    self.set_attribute(item, AttributeKind::CodeRegion, AttributeValue::Text(name));
                }
                items.push(item);
            } else {
                let from = self.current_span();
                if self.cursor.position() == pos {
                    let kind = self.current_kind();
                    self.error(
                        ParseError::new(
                            ErrorCode::E1001,
                            format!("unexpected {} at module level", kind.display_name()),
                            from,
                        )
                        .with_context("expected a declaration or routine"),
                    );
                    self.cursor.advance();
                }
                synchronize(&mut self.cursor, ITEM_START);
                self.record_skipped(items.last().copied(), from);
            }
        }
        let end = self.cursor.tokens().eof().span.end;
        self.ast.alloc(NodeKind::Module { items }, Span::new(0, end))
    }

    /// One module-level item, or `None` when the current token starts none.
    fn item(&mut self) -> Option<NodeId> {
        let start = self.current_span();
        let access = self.access();
        let item = match self.current_kind() {
            TokenKind::Import => self.import(start),
            TokenKind::Schema | TokenKind::Database => self.schema(start),
            TokenKind::Globals => self.globals(start),
            TokenKind::Define => self.define(start, access),
            TokenKind::Constant => self.constant(start, access),
            TokenKind::Type => self.type_decl(start, access),
            TokenKind::Main => self.main(start),
            TokenKind::Function | TokenKind::Report => self.function(start, access),
            _ => {
                if access != Access::Default {
                    let error = self
                        .cursor
                        .make_expect_error("DEFINE, CONSTANT, TYPE, FUNCTION or REPORT");
                    self.error(error);
                }
                return None;
            }
        };
        Some(item)
    }

    fn access(&mut self) -> Access {
        if self.eat(TokenKind::Public).is_some() {
            Access::Public
        } else if self.eat(TokenKind::Private).is_some() {
            Access::Private
        } else {
            Access::Default
        }
    }

    /// `#region name` comment directly before the current token.
    fn pending_region(&self) -> Option<Box<str>> {
        let from = self.previous_span().end;
        let to = self.current_span().start;
        self.cursor
            .tokens()
            .comments_between(from, to)
            .iter()
            .rev()
            .find_map(|comment| {
                let content = comment.content();
                let rest = content.get(..6)?;
                if !rest.eq_ignore_ascii_case("region") {
                    return None;
                }
                let name = content[6..].trim();
                (!name.is_empty()).then(|| name.into())
            })
    }

    /// Report `END x` that closes nothing open, and skip it.
    pub(crate) fn stray_end(&mut self, owner: Option<NodeId>) {
        let from = self.cursor.advance().span;
        let next = self.current_kind();
        let text = if next.is_keyword() {
            self.cursor.advance();
            format!("END {}", next.display_name())
        } else {
            "END".to_owned()
        };
        self.error(
            ParseError::new(ErrorCode::E1001, format!("unexpected {text}"), self.span_from(from))
                .with_context("nothing open to close here"),
        );
        self.record_skipped(owner, from);
    }

    /// `IMPORT [FGL | JAVA] a.b.c`
    fn import(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        let kind = if self.cursor.eat_word("fgl").is_some() {
            ImportKind::Fgl
        } else if self.cursor.eat_word("java").is_some() {
            ImportKind::Java
        } else {
            ImportKind::Builtin
        };

        let mut path = Vec::new();
        let mut gaps: Vec<Box<str>> = Vec::new();
        if let Some(first) = self.declared_name() {
            path.push(first);
            while self.check(TokenKind::Dot) {
                gaps.push(self.gap_before_current().into());
                self.cursor.advance();
                gaps.push(self.gap_before_current().into());
                match self.cursor.expect_ident_or_keyword() {
                    Ok(segment) => path.push(segment),
                    Err(error) => {
                        self.error(error);
                        break;
                    }
                }
            }
        }

        let missing = path.is_empty();
        let id = self.alloc(NodeKind::Import { kind, path }, start);
        if missing {
            self.mark_incomplete(id);
        }
        if gaps.iter().any(|gap| !gap.is_empty()) {
            self.set_attribute(id, AttributeKind::NamesWhitespace, AttributeValue::TextList(gaps));
        }
        id
    }

    /// `SCHEMA name`, or its alternate spelling `DATABASE name`.
    pub(crate) fn schema(&mut self, start: Span) -> NodeId {
        let alt = self.cursor.advance().kind == TokenKind::Database;
        let name = self.declared_name();
        let missing = name.is_none();
        let id = self.alloc(NodeKind::Schema { name }, start);
        if alt {
            self.ast.attributes.mark(id, AttributeKind::AltForm);
        }
        if missing {
            self.mark_incomplete(id);
        }
        id
    }

    /// `GLOBALS "file.4gl"` or `GLOBALS declarations END GLOBALS`.
    fn globals(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        if self.check(TokenKind::String) {
            let file: Box<str> = self.cursor.advance().value().into();
            return self.alloc(
                NodeKind::Globals {
                    file: Some(file),
                    items: Vec::new(),
                },
                start,
            );
        }

        let ctx = ParseContext::globals();
        let mut items = Vec::new();
        loop {
            let item_start = self.current_span();
            let access = match self.cursor.peek_kind_at(1) {
                TokenKind::Define | TokenKind::Constant | TokenKind::Type => self.access(),
                _ => Access::Default,
            };
            match self.current_kind() {
                TokenKind::Define => items.push(self.define(item_start, access)),
                TokenKind::Constant => items.push(self.constant(item_start, access)),
                TokenKind::Type => items.push(self.type_decl(item_start, access)),
                TokenKind::End if ctx.closes(self.cursor.peek_kind_at(1)) => break,
                TokenKind::End => self.stray_end(items.last().copied()),
                kind if kind == TokenKind::Eof || ctx.stops_at(kind) => break,
                kind => {
                    let from = self.current_span();
                    self.error(
                        ParseError::new(
                            ErrorCode::E1001,
                            format!("unexpected {} in GLOBALS", kind.display_name()),
                            from,
                        )
                        .with_context("expected DEFINE, CONSTANT or TYPE"),
                    );
                    self.cursor.advance();
                    synchronize(&mut self.cursor, ITEM_START.with(TokenKind::End));
                    self.record_skipped(items.last().copied(), from);
                }
            }
        }
        self.close_construct(NodeKind::Globals { file: None, items }, start, TokenKind::Globals)
    }

    /// Identifier of a declaration; reports and returns `None` when absent.
    pub(crate) fn declared_name(&mut self) -> Option<Ident> {
        let result = self.cursor.expect_ident();
        self.report(result)
    }
}
