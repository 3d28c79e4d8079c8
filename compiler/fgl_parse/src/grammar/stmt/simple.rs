//! Assignments, calls and one-line statements.

use fgl_diagnostic::ErrorCode;
use fgl_ir::{DeferKind, NodeId, NodeKind, Span, TokenKind, WheneverAction, WheneverCondition};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `LET target = expr {, expr}`
    pub(super) fn let_stmt(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        let target = self.expect_name("assignment target");
        let eq = self.cursor.expect(TokenKind::Eq);
        self.report(eq);
        let values = self.comma_list("expression", true, Self::try_expr);
        let complete = target.is_some() && !values.is_empty();
        let id = self.alloc(NodeKind::Let { target, values }, start);
        if !complete {
            self.mark_incomplete(id);
        }
        id
    }

    /// `CALL name(args) [RETURNING target {, target}]`
    pub(super) fn call_stmt(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        let callee = self.expect_name("function name");
        let returning = if self.eat(TokenKind::Returning).is_some() {
            self.target_list("RETURNING variable")
        } else {
            Vec::new()
        };
        let id = self.alloc(NodeKind::Call { callee, returning }, start);
        if callee.is_none() {
            self.mark_incomplete(id);
        }
        id
    }

    /// `RETURN [expr {, expr}]`
    pub(super) fn return_stmt(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        let values = self.comma_list("return value", false, Self::try_expr);
        self.alloc(NodeKind::Return { values }, start)
    }

    /// `DISPLAY`, `MESSAGE` and `ERROR` with their value lists.
    pub(super) fn output_stmt(&mut self, start: Span, keyword: TokenKind) -> NodeId {
        self.cursor.advance();
        let values = self.comma_list("value", true, Self::try_expr);
        let empty = values.is_empty();
        let kind = match keyword {
            TokenKind::Display => NodeKind::Display { values },
            TokenKind::Message => NodeKind::Message { values },
            _ => NodeKind::ErrorStmt { values },
        };
        let id = self.alloc(kind, start);
        if empty {
            self.mark_incomplete(id);
        }
        id
    }

    /// `INITIALIZE targets TO NULL` or `INITIALIZE targets LIKE table.* {, ...}`
    pub(super) fn initialize_stmt(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        let targets = self.target_list("variable");
        let mut complete = !targets.is_empty();
        if self.eat(TokenKind::To).is_some() {
            let null = self.cursor.expect(TokenKind::Null);
            complete &= self.report(null).is_some();
        } else if self.eat(TokenKind::Like).is_some() {
            let columns = self.comma_list("column reference", true, |p| {
                p.cursor.check_ident().then(|| p.like_column())
            });
            complete &= !columns.is_empty();
        } else {
            let error = self.cursor.make_expect_error("TO NULL or LIKE");
            self.error(error);
            complete = false;
        }
        let id = self.alloc(NodeKind::Initialize { targets }, start);
        if !complete {
            self.mark_incomplete(id);
        }
        id
    }

    /// `table.column` or `table.*` in `INITIALIZE ... LIKE`; only checked.
    fn like_column(&mut self) -> Span {
        let start = self.cursor.advance().span;
        let dot = self.cursor.expect(TokenKind::Dot);
        if self.report(dot).is_some() && self.eat(TokenKind::Star).is_none() {
            let column = self.cursor.expect_ident_or_keyword();
            self.report(column);
        }
        self.span_from(start)
    }

    /// `WHENEVER condition action`
    pub(super) fn whenever_stmt(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        let condition = self.whenever_condition();
        let action = if condition.is_some() {
            self.whenever_action()
        } else {
            None
        };
        let complete = condition.is_some() && action.is_some();
        let id = self.alloc(
            NodeKind::Whenever {
                condition: condition.unwrap_or(WheneverCondition::Error),
                action,
            },
            start,
        );
        if !complete {
            self.mark_incomplete(id);
        }
        id
    }

    fn whenever_condition(&mut self) -> Option<WheneverCondition> {
        if self.cursor.eat_word("any").is_some() {
            if self.eat(TokenKind::Error).is_some() || self.cursor.eat_word("sqlerror").is_some() {
                return Some(WheneverCondition::AnyError);
            }
            let error = self.cursor.make_expect_error("ERROR or SQLERROR after ANY");
            self.error(error);
            return None;
        }
        if self.eat(TokenKind::Error).is_some() || self.cursor.eat_word("sqlerror").is_some() {
            return Some(WheneverCondition::Error);
        }
        if self.cursor.eat_word("warning").is_some() || self.cursor.eat_word("sqlwarning").is_some()
        {
            return Some(WheneverCondition::Warning);
        }
        if self.check(TokenKind::Not) && self.cursor.peek_at(1).is_word("found") {
            self.cursor.advance();
            self.cursor.advance();
            return Some(WheneverCondition::NotFound);
        }
        let error = self
            .cursor
            .make_expect_error("ERROR, ANY ERROR, WARNING or NOT FOUND");
        self.error(error);
        None
    }

    fn whenever_action(&mut self) -> Option<WheneverAction> {
        if self.eat(TokenKind::Continue).is_some() {
            return Some(WheneverAction::Continue);
        }
        if self.cursor.eat_word("stop").is_some() {
            return Some(WheneverAction::Stop);
        }
        if self.eat(TokenKind::Call).is_some() {
            return self.declared_name().map(WheneverAction::Call);
        }
        if self.eat(TokenKind::Goto).is_some() {
            self.eat(TokenKind::Colon);
            return self.declared_name().map(WheneverAction::Goto);
        }
        let error = self.cursor.make_expect_error("CONTINUE, STOP, CALL or GOTO");
        self.error(error);
        None
    }

    /// `SLEEP seconds`
    pub(super) fn sleep_stmt(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        let seconds = self.expect_expr("number of seconds");
        let id = self.alloc(NodeKind::Sleep { seconds }, start);
        if seconds.is_none() {
            self.mark_incomplete(id);
        }
        id
    }

    /// `DEFER INTERRUPT` or `DEFER QUIT`
    pub(super) fn defer_stmt(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        let kind = if self.cursor.eat_word("interrupt").is_some() {
            Some(DeferKind::Interrupt)
        } else if self.cursor.eat_word("quit").is_some() {
            Some(DeferKind::Quit)
        } else {
            let error = self.cursor.make_expect_error("INTERRUPT or QUIT");
            self.error(error);
            None
        };
        let id = self.alloc(NodeKind::Defer { kind }, start);
        if kind.is_none() {
            self.mark_incomplete(id);
        }
        id
    }

    /// `GOTO [:]label`
    pub(super) fn goto_stmt(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        self.eat(TokenKind::Colon);
        let label = self.declared_name();
        let missing = label.is_none();
        let id = self.alloc(NodeKind::Goto { label }, start);
        if missing {
            self.mark_incomplete(id);
        }
        id
    }

    /// `LABEL name:`
    pub(super) fn label_stmt(&mut self, start: Span) -> NodeId {
        self.cursor.advance();
        let name = self.declared_name();
        let missing = name.is_none();
        if !missing {
            let colon = self.cursor.expect(TokenKind::Colon);
            self.report(colon);
        }
        let id = self.alloc(NodeKind::Label { name }, start);
        if missing {
            self.mark_incomplete(id);
        }
        id
    }

    /// A name path that must be present.
    pub(super) fn expect_name(&mut self, what: &str) -> Option<NodeId> {
        let name = self.try_name();
        if name.is_none() {
            let found = self.current_kind();
            let error = if found == TokenKind::Eof {
                ParseError::expected(what, found, self.current_span())
            } else {
                ParseError::new(
                    ErrorCode::E1004,
                    format!("expected {what}, found {}", found.display_name()),
                    self.current_span(),
                )
                .with_context("expected a name")
            };
            self.error(error);
        }
        name
    }
}
