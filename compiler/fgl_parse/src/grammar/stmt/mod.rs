//! Statement parsing.
//!
//! - `control.rs`: `IF`, loops, `CASE`, `TRY`, `MENU`, `EXIT`, `CONTINUE`
//! - `simple.rs`: assignments, calls and the one-line statements
//! - `sql.rs`: cursors, prepared statements and SQL pass-through
//!
//! A block runs until the token after `END` names a construct that is open,
//! or until a keyword the enclosing construct stops at. Any other `END x` is
//! reported and skipped.

mod control;
mod simple;
mod sql;

use fgl_diagnostic::ErrorCode;
use fgl_ir::{Access, NodeId, TokenKind};

use crate::context::ParseContext;
use crate::recovery::synchronize;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse a statement block in its own binding frame.
    pub(crate) fn block(&mut self, ctx: ParseContext) -> Vec<NodeId> {
        self.with_binder_frame(|p| p.block_items(ctx))
    }

    fn block_items(&mut self, ctx: ParseContext) -> Vec<NodeId> {
        let mut stmts: Vec<NodeId> = Vec::new();
        loop {
            let kind = self.current_kind();
            if kind == TokenKind::Eof {
                break;
            }
            if kind == TokenKind::End {
                if ctx.closes(self.cursor.peek_kind_at(1)) {
                    break;
                }
                self.stray_end(stmts.last().copied());
                continue;
            }
            if ctx.stops_at(kind) || (ctx.in_menu() && self.at_menu_arm()) {
                break;
            }
            if let Some(stmt) = self.statement(ctx) {
                stmts.push(stmt);
                continue;
            }

            let from = self.current_span();
            self.error(
                ParseError::new(
                    ErrorCode::E1001,
                    format!("unexpected {}", kind.display_name()),
                    from,
                )
                .with_context("expected a statement"),
            );
            self.cursor.advance();
            synchronize(&mut self.cursor, ctx.recovery());
            self.record_skipped(stmts.last().copied(), from);
        }
        stmts
    }

    /// One statement, or `None` when the current token starts none.
    fn statement(&mut self, ctx: ParseContext) -> Option<NodeId> {
        fgl_stack::ensure_sufficient_stack(|| self.statement_inner(ctx))
    }

    fn statement_inner(&mut self, ctx: ParseContext) -> Option<NodeId> {
        let start = self.current_span();
        let kind = self.current_kind();
        tracing::trace!(kind = %kind.display_name(), "statement");
        let stmt = match kind {
            TokenKind::Define => self.define(start, Access::Default),
            TokenKind::Constant => self.constant(start, Access::Default),
            TokenKind::Type => self.type_decl(start, Access::Default),
            TokenKind::Database => self.schema(start),

            TokenKind::Let => self.let_stmt(start),
            TokenKind::Call => self.call_stmt(start),
            TokenKind::Return => self.return_stmt(start),
            TokenKind::Display | TokenKind::Message | TokenKind::Error => {
                self.output_stmt(start, kind)
            }
            TokenKind::Initialize => self.initialize_stmt(start),
            TokenKind::Whenever => self.whenever_stmt(start),
            TokenKind::Sleep => self.sleep_stmt(start),
            TokenKind::Defer => self.defer_stmt(start),
            TokenKind::Goto => self.goto_stmt(start),
            TokenKind::Label => self.label_stmt(start),

            TokenKind::If => self.if_stmt(start, ctx),
            TokenKind::While => self.while_stmt(start, ctx),
            TokenKind::For => self.for_stmt(start, ctx),
            TokenKind::Foreach => self.foreach_stmt(start, ctx),
            TokenKind::Case => self.case_stmt(start, ctx),
            TokenKind::Try => self.try_stmt(start, ctx),
            TokenKind::Menu => self.menu_stmt(start, ctx),
            TokenKind::Exit => self.exit_stmt(start, ctx),
            TokenKind::Continue => self.continue_stmt(start, ctx),

            TokenKind::Declare => self.declare_stmt(start),
            TokenKind::Prepare => self.prepare_stmt(start),
            TokenKind::Open => self.open_stmt(start),
            TokenKind::Fetch => self.fetch_stmt(start),
            TokenKind::Close | TokenKind::Free => self.release_stmt(start, kind),
            TokenKind::Execute => self.execute_stmt(start),
            TokenKind::Select | TokenKind::Insert | TokenKind::Update | TokenKind::Delete => {
                self.sql_stmt()
            }
            _ => return None,
        };
        Some(stmt)
    }

    /// `COMMAND`, `ON ACTION` or `BEFORE MENU` opening a menu arm.
    fn at_menu_arm(&self) -> bool {
        self.cursor.check_word("command")
            || (self.check(TokenKind::On) && self.cursor.peek_at(1).is_word("action"))
            || (self.cursor.check_word("before") && self.cursor.peek_kind_at(1) == TokenKind::Menu)
    }

    /// Required comma list of name paths (assignment targets, `INTO` lists).
    fn target_list(&mut self, what: &str) -> Vec<NodeId> {
        self.comma_list(what, true, Self::try_name)
    }
}
