//! Control-flow statements.

use fgl_diagnostic::ErrorCode;
use fgl_ir::{LoopKind, MenuOptionKind, NodeId, NodeKind, Span, TokenKind};

use crate::context::ParseContext;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `IF cond THEN stmts [ELSE stmts] END IF`
    pub(super) fn if_stmt(&mut self, start: Span, ctx: ParseContext) -> NodeId {
        self.cursor.advance();
        let cond = self.expect_expr("condition");
        let then = self.cursor.expect(TokenKind::Then);
        self.report(then);

        let inner = ctx.entering(None, TokenKind::If);
        let then_body = self.block(inner.stopping_at(TokenKind::Else));
        let else_body = if self.eat(TokenKind::Else).is_some() {
            self.block(inner)
        } else {
            Vec::new()
        };
        let id = self.close_construct(
            NodeKind::If {
                cond,
                then_body,
                else_body,
            },
            start,
            TokenKind::If,
        );
        if cond.is_none() {
            self.mark_incomplete(id);
        }
        id
    }

    /// `WHILE cond stmts END WHILE`
    pub(super) fn while_stmt(&mut self, start: Span, ctx: ParseContext) -> NodeId {
        self.cursor.advance();
        let cond = self.expect_expr("loop condition");
        let body = self.block(ctx.entering(Some(LoopKind::While), TokenKind::While));
        let id = self.close_construct(NodeKind::While { cond, body }, start, TokenKind::While);
        if cond.is_none() {
            self.mark_incomplete(id);
        }
        id
    }

    /// `FOR var = start TO end [STEP step] stmts END FOR`
    pub(super) fn for_stmt(&mut self, start: Span, ctx: ParseContext) -> NodeId {
        self.cursor.advance();
        let var = self.expect_name("loop variable");
        let eq = self.cursor.expect(TokenKind::Eq);
        self.report(eq);
        let from = self.expect_expr("start value");
        let to = self.cursor.expect(TokenKind::To);
        let end = if self.report(to).is_some() {
            self.expect_expr("end value")
        } else {
            None
        };
        let step = if self.eat(TokenKind::Step).is_some() {
            self.expect_expr("step value")
        } else {
            None
        };
        let body = self.block(ctx.entering(Some(LoopKind::For), TokenKind::For));
        let complete = var.is_some() && from.is_some() && end.is_some();
        let id = self.close_construct(
            NodeKind::For {
                var,
                start: from,
                end,
                step,
                body,
            },
            start,
            TokenKind::For,
        );
        if !complete {
            self.mark_incomplete(id);
        }
        id
    }

    /// `FOREACH cursor [USING exprs] [INTO targets] [WITH REOPTIMIZATION] stmts END FOREACH`
    pub(super) fn foreach_stmt(&mut self, start: Span, ctx: ParseContext) -> NodeId {
        self.cursor.advance();
        let cursor = self.declared_name();
        let using = if self.eat(TokenKind::Using).is_some() {
            self.comma_list("USING value", true, Self::try_expr)
        } else {
            Vec::new()
        };
        let into = if self.eat(TokenKind::Into).is_some() {
            self.target_list("INTO variable")
        } else {
            Vec::new()
        };
        if self.check(TokenKind::With) && self.cursor.peek_at(1).is_word("reoptimization") {
            self.cursor.advance();
            self.cursor.advance();
        }
        let body = self.block(ctx.entering(Some(LoopKind::Foreach), TokenKind::Foreach));
        let reference = cursor.clone();
        let id = self.close_construct(
            NodeKind::Foreach {
                cursor,
                using,
                into,
                body,
            },
            start,
            TokenKind::Foreach,
        );
        match reference {
            Some(name) => self.bind_reference(id, &name),
            None => self.mark_incomplete(id),
        }
        id
    }

    /// `CASE [subject] {WHEN values stmts} [OTHERWISE stmts] END CASE`
    pub(super) fn case_stmt(&mut self, start: Span, ctx: ParseContext) -> NodeId {
        self.cursor.advance();
        let subject = match self.current_kind() {
            TokenKind::When | TokenKind::Otherwise => None,
            _ => self.try_expr(),
        };

        let inner = ctx.entering(Some(LoopKind::Case), TokenKind::Case);
        let arm_ctx = inner
            .stopping_at(TokenKind::When)
            .stopping_at(TokenKind::Otherwise);
        let mut arms = Vec::new();
        loop {
            let arm_start = self.current_span();
            match self.current_kind() {
                TokenKind::When => {
                    self.cursor.advance();
                    let conds = self.comma_list("WHEN value", true, Self::try_expr);
                    let empty = conds.is_empty();
                    let body = self.block(arm_ctx);
                    let arm = self.alloc(NodeKind::When { conds, body }, arm_start);
                    if empty {
                        self.mark_incomplete(arm);
                    }
                    arms.push(arm);
                }
                TokenKind::Otherwise => {
                    self.cursor.advance();
                    let body = self.block(arm_ctx);
                    arms.push(self.alloc(NodeKind::Otherwise { body }, arm_start));
                }
                TokenKind::End if inner.closes(self.cursor.peek_kind_at(1)) => break,
                TokenKind::End => self.stray_end(arms.last().copied()),
                kind if kind == TokenKind::Eof || ctx.stops_at(kind) => break,
                kind => {
                    self.error(
                        ParseError::new(
                            ErrorCode::E1001,
                            format!("unexpected {} in CASE", kind.display_name()),
                            arm_start,
                        )
                        .with_context("expected WHEN or OTHERWISE"),
                    );
                    self.cursor.advance();
                    crate::recovery::synchronize(&mut self.cursor, arm_ctx.recovery());
                    self.record_skipped(arms.last().copied(), arm_start);
                }
            }
        }
        self.close_construct(NodeKind::Case { subject, arms }, start, TokenKind::Case)
    }

    /// `TRY stmts [CATCH stmts] END TRY`
    pub(super) fn try_stmt(&mut self, start: Span, ctx: ParseContext) -> NodeId {
        self.cursor.advance();
        let inner = ctx.entering(None, TokenKind::Try);
        let body = self.block(inner.stopping_at(TokenKind::Catch));
        let catch_body = if self.eat(TokenKind::Catch).is_some() {
            self.block(inner)
        } else {
            Vec::new()
        };
        self.close_construct(NodeKind::Try { body, catch_body }, start, TokenKind::Try)
    }

    /// `MENU [title] options END MENU`
    pub(super) fn menu_stmt(&mut self, start: Span, ctx: ParseContext) -> NodeId {
        self.cursor.advance();
        let title = if self.at_menu_arm() {
            None
        } else {
            self.try_expr()
        };
        let inner = ctx.entering(Some(LoopKind::Menu), TokenKind::Menu);
        let mut options = Vec::new();
        loop {
            let kind = self.current_kind();
            if self.at_menu_arm() {
                options.push(self.menu_option(inner));
            } else if kind == TokenKind::End {
                if inner.closes(self.cursor.peek_kind_at(1)) {
                    break;
                }
                self.stray_end(options.last().copied());
            } else if kind == TokenKind::Eof || ctx.stops_at(kind) {
                break;
            } else {
                let from = self.current_span();
                self.error(
                    ParseError::new(
                        ErrorCode::E1001,
                        format!("unexpected {} in MENU", kind.display_name()),
                        from,
                    )
                    .with_context("expected COMMAND, ON ACTION or BEFORE MENU"),
                );
                self.cursor.advance();
                while !self.is_at_end() && !self.at_menu_arm() && !self.check(TokenKind::End) {
                    self.cursor.advance();
                }
                self.record_skipped(options.last().copied(), from);
            }
        }
        self.close_construct(NodeKind::Menu { title, options }, start, TokenKind::Menu)
    }

    fn menu_option(&mut self, ctx: ParseContext) -> NodeId {
        let first = self.cursor.advance();
        let start = first.span;
        let (kind, name) = if first.is_word("command") {
            if self.cursor.eat_word("key").is_some() {
                self.skip_key_list();
            }
            let name = self.try_expr();
            // Optional help text.
            self.eat(TokenKind::String);
            (MenuOptionKind::Command, name)
        } else if self.check(TokenKind::Menu) {
            // `BEFORE MENU`
            self.cursor.advance();
            (MenuOptionKind::BeforeMenu, None)
        } else {
            // `ON ACTION name`
            self.cursor.advance();
            let name = self.expect_name("action name");
            (MenuOptionKind::Action, name)
        };
        let body = self.block(ctx.with_menu_arms());
        self.alloc(NodeKind::MenuOption { kind, name, body }, start)
    }

    /// `KEY (k {, k})` of a menu command; the keys are not kept.
    fn skip_key_list(&mut self) {
        let open = self.cursor.expect(TokenKind::LParen);
        if self.report(open).is_none() {
            return;
        }
        while !self.is_at_end() && !self.check(TokenKind::RParen) && !self.check(TokenKind::End) {
            self.cursor.advance();
        }
        self.expect_closing(TokenKind::RParen, "key list");
    }

    /// `EXIT target [code]`
    pub(super) fn exit_stmt(&mut self, start: Span, ctx: ParseContext) -> NodeId {
        self.cursor.advance();
        let gap = self.gap_before_current();
        let target = self.loop_target("EXIT");
        let code = if target == Some(LoopKind::Program) {
            self.try_expr()
        } else {
            None
        };
        let id = self.alloc(NodeKind::Exit { target, code }, start);
        self.ast.attributes.set_preceding_whitespace(id, 1, gap);
        match target {
            Some(target) if !ctx.allows_exit(target) => {
                let span = self.ast.span(id);
                self.error(
                    ParseError::new(ErrorCode::E1008, "invalid exit statement", span).with_context(
                        format!("EXIT {0} is not inside a {0} block", target.keyword()),
                    ),
                );
            }
            Some(_) => {}
            None => self.mark_incomplete(id),
        }
        id
    }

    /// `CONTINUE target`
    pub(super) fn continue_stmt(&mut self, start: Span, ctx: ParseContext) -> NodeId {
        self.cursor.advance();
        let gap = self.gap_before_current();
        let target = self.loop_target("CONTINUE");
        let id = self.alloc(NodeKind::Continue { target }, start);
        self.ast.attributes.set_preceding_whitespace(id, 1, gap);
        match target {
            Some(target) if !ctx.allows_continue(target) => {
                let span = self.ast.span(id);
                self.error(
                    ParseError::new(ErrorCode::E1008, "invalid continue statement", span)
                        .with_context(format!(
                            "CONTINUE {0} is not inside a {0} loop",
                            target.keyword()
                        )),
                );
            }
            Some(_) => {}
            None => self.mark_incomplete(id),
        }
        id
    }

    fn loop_target(&mut self, keyword: &str) -> Option<LoopKind> {
        let target = match self.current_kind() {
            TokenKind::While => LoopKind::While,
            TokenKind::For => LoopKind::For,
            TokenKind::Foreach => LoopKind::Foreach,
            TokenKind::Case => LoopKind::Case,
            TokenKind::Menu => LoopKind::Menu,
            TokenKind::Program => LoopKind::Program,
            _ => {
                let error = self.cursor.make_expect_error(&format!(
                    "WHILE, FOR, FOREACH, CASE, MENU or PROGRAM after {keyword}"
                ));
                self.error(error);
                return None;
            }
        };
        self.cursor.advance();
        Some(target)
    }
}
