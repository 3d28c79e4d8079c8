//! Cursors, prepared statements and SQL pass-through.
//!
//! `DECLARE` and `PREPARE` bind their name in the current block frame; the
//! statements that use a cursor or statement name record the declaration
//! they resolved to as a `VariableReference` attribute.

use fgl_ir::{
    AttributeKind, AttributeValue, CursorSource, FetchDirection, Ident, NodeId, NodeKind, Span,
    SqlVerb, TokenKind,
};

use crate::recovery::{SQL_END, STMT_START};
use crate::Parser;

impl Parser<'_> {
    /// Link a cursor or statement reference to the declaration in scope.
    pub(crate) fn bind_reference(&mut self, node: NodeId, name: &Ident) {
        if let Some(decl) = self.binders.lookup(name) {
            self.set_attribute(node, AttributeKind::VariableReference, AttributeValue::Node(decl));
        }
    }

    fn bind_declaration(&mut self, node: NodeId, name: &Ident) {
        self.binders.declare(name, node);
        self.set_attribute(node, AttributeKind::Variable, AttributeValue::Text(name.text.clone()));
    }

    /// `DECLARE name [SCROLL] CURSOR [WITH HOLD] FOR {statement | SQL}`
    /// or `... FROM expr`.
    pub(super) fn declare_stmt(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        let cursor = self.declared_name();
        let scroll = self.cursor.eat_word("scroll").is_some();
        let keyword = self.cursor.expect(TokenKind::Cursor);
        self.report(keyword);
        let hold = self.check(TokenKind::With) && self.cursor.peek_at(1).is_word("hold");
        if hold {
            self.cursor.advance();
            self.cursor.advance();
        }

        let source = if self.eat(TokenKind::For).is_some() {
            match self.current_kind() {
                TokenKind::Select | TokenKind::Insert | TokenKind::Update | TokenKind::Delete => {
                    CursorSource::Sql(self.sql_stmt())
                }
                _ => self
                    .declared_name()
                    .map_or(CursorSource::Missing, CursorSource::Prepared),
            }
        } else if self.eat(TokenKind::From).is_some() {
            self.expect_expr("SQL text")
                .map_or(CursorSource::Missing, CursorSource::Expr)
        } else {
            let error = self.cursor.make_expect_error("FOR or FROM");
            self.error(error);
            CursorSource::Missing
        };

        let prepared = match &source {
            CursorSource::Prepared(statement) => Some(statement.clone()),
            _ => None,
        };
        let complete = cursor.is_some() && source != CursorSource::Missing;
        let name = cursor.clone();
        let id = self.alloc(
            NodeKind::Declare {
                cursor,
                scroll,
                hold,
                source,
            },
            start,
        );
        if let Some(statement) = prepared {
            self.bind_reference(id, &statement);
        }
        if let Some(name) = name {
            self.bind_declaration(id, &name);
        }
        if !complete {
            self.mark_incomplete(id);
        }
        id
    }

    /// `PREPARE name FROM expr`
    pub(super) fn prepare_stmt(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        let statement = self.declared_name();
        let keyword = self.cursor.expect(TokenKind::From);
        let from = if self.report(keyword).is_some() {
            self.expect_expr("SQL text")
        } else {
            None
        };
        let complete = statement.is_some() && from.is_some();
        let name = statement.clone();
        let id = self.alloc(NodeKind::Prepare { statement, from }, start);
        if let Some(name) = name {
            self.bind_declaration(id, &name);
        }
        if !complete {
            self.mark_incomplete(id);
        }
        id
    }

    /// `OPEN cursor [USING exprs]`
    pub(super) fn open_stmt(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        let cursor = self.declared_name();
        let using = if self.eat(TokenKind::Using).is_some() {
            self.comma_list("USING value", true, Self::try_expr)
        } else {
            Vec::new()
        };
        let name = cursor.clone();
        let id = self.alloc(NodeKind::Open { cursor, using }, start);
        self.finish_reference(id, name.as_ref());
        id
    }

    /// `FETCH [NEXT | PREVIOUS | PRIOR | FIRST | LAST] cursor [INTO targets]`
    pub(super) fn fetch_stmt(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        let direction = self.fetch_direction();
        let cursor = self.declared_name();
        let into = if self.eat(TokenKind::Into).is_some() {
            self.target_list("INTO variable")
        } else {
            Vec::new()
        };
        let name = cursor.clone();
        let id = self.alloc(
            NodeKind::Fetch {
                direction,
                cursor,
                into,
            },
            start,
        );
        self.finish_reference(id, name.as_ref());
        id
    }

    /// A direction word counts only when a cursor name follows it, so a
    /// cursor called `next` still parses.
    fn fetch_direction(&mut self) -> FetchDirection {
        if self.cursor.peek_kind_at(1) != TokenKind::Ident {
            return FetchDirection::Next;
        }
        let direction = match self.cursor.current() {
            t if t.is_word("next") => FetchDirection::Next,
            t if t.is_word("previous") || t.is_word("prior") => FetchDirection::Previous,
            t if t.is_word("first") => FetchDirection::First,
            t if t.is_word("last") => FetchDirection::Last,
            _ => return FetchDirection::Next,
        };
        self.cursor.advance();
        direction
    }

    /// `CLOSE cursor` and `FREE cursor`
    pub(super) fn release_stmt(&mut self, start: Span, keyword: TokenKind) -> NodeId {
        self.cursor.advance();
        let cursor = self.declared_name();
        let name = cursor.clone();
        let kind = if keyword == TokenKind::Close {
            NodeKind::Close { cursor }
        } else {
            NodeKind::Free { cursor }
        };
        let id = self.alloc(kind, start);
        self.finish_reference(id, name.as_ref());
        id
    }

    /// `EXECUTE statement [USING exprs] [INTO targets]` or `EXECUTE IMMEDIATE expr`
    pub(super) fn execute_stmt(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        if self.cursor.eat_word("immediate").is_some() {
            let sql = self.expect_expr("SQL text");
            let id = self.alloc(NodeKind::ExecuteImmediate { sql }, start);
            if sql.is_none() {
                self.mark_incomplete(id);
            }
            return id;
        }

        let statement = self.declared_name();
        let mut using = Vec::new();
        let mut into = Vec::new();
        // Either order is accepted.
        for _ in 0..2 {
            if self.eat(TokenKind::Using).is_some() {
                using = self.comma_list("USING value", true, Self::try_expr);
            } else if self.eat(TokenKind::Into).is_some() {
                into = self.target_list("INTO variable");
            }
        }
        let name = statement.clone();
        let id = self.alloc(
            NodeKind::Execute {
                statement,
                using,
                into,
            },
            start,
        );
        self.finish_reference(id, name.as_ref());
        id
    }

    fn finish_reference(&mut self, id: NodeId, name: Option<&Ident>) {
        match name {
            Some(name) => self.bind_reference(id, name),
            None => self.mark_incomplete(id),
        }
    }

    /// Embedded SQL, kept verbatim.
    ///
    /// The statement runs to the first structural keyword, a `;`, or a
    /// statement keyword at the start of a line. `SELECT ... INTO` host
    /// variables are parsed as name paths.
    pub(crate) fn sql_stmt(&mut self) -> NodeId {
        let first = self.cursor.advance();
        let start = first.span;
        let verb = match first.kind {
            TokenKind::Insert => SqlVerb::Insert,
            TokenKind::Update => SqlVerb::Update,
            TokenKind::Delete => SqlVerb::Delete,
            _ => SqlVerb::Select,
        };

        let mut into = Vec::new();
        let mut depth = 0u32;
        let mut case_depth = 0u32;
        loop {
            let kind = self.current_kind();
            let line_start = self.gap_before_current().contains('\n');
            if kind == TokenKind::Case && !(case_depth == 0 && line_start) {
                case_depth += 1;
            } else if case_depth > 0
                && matches!(
                    kind,
                    TokenKind::When | TokenKind::Then | TokenKind::Else | TokenKind::End
                )
            {
                if kind == TokenKind::End {
                    case_depth -= 1;
                }
            } else if SQL_END.contains(kind) {
                break;
            } else if depth == 0 {
                match kind {
                    TokenKind::Semicolon => break,
                    TokenKind::For if self.cursor.peek_kind_at(1) == TokenKind::Update => {
                        self.cursor.advance();
                    }
                    TokenKind::For => break,
                    TokenKind::Into if verb == SqlVerb::Select => {
                        self.cursor.advance();
                        if self.cursor.check_word("temp") {
                            continue;
                        }
                        into.extend(self.target_list("INTO variable"));
                        continue;
                    }
                    _ if line_start && STMT_START.contains(kind) => break,
                    _ => {}
                }
            }
            match kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.cursor.advance();
        }

        let span = self.span_from(start);
        let text = self.source_text(span);
        self.eat(TokenKind::Semicolon);
        let id = self.ast.alloc(NodeKind::Sql { verb, into }, span);
        self.set_attribute(id, AttributeKind::VerbatimImage, AttributeValue::Text(text.into()));
        id
    }
}
