//! Expression parsing.
//!
//! Precedence, loosest first:
//!
//! | Level | Operators |
//! |-------|-----------|
//! | 1 | `OR` |
//! | 2 | `AND` |
//! | 3 | `NOT` (prefix) |
//! | 4 | `= == != <> < <= > >=`, `IS [NOT] NULL`, `[NOT] LIKE`, `[NOT] MATCHES` |
//! | 5 | `\|\|` |
//! | 6 | `+ -` |
//! | 7 | `* / MOD` |
//! | 8 | `**` (right-associative) |
//! | 9 | unary `- +` |
//! | 10 | postfix `CLIPPED`, `USING fmt` |
//!
//! A missing right operand is reported once and leaves the operator node
//! incomplete with `rhs: None`.

mod name;

use fgl_diagnostic::ErrorCode;
use fgl_ir::{AttributeKind, BinaryOp, LiteralKind, NodeId, NodeKind, Span, TokenKind, UnaryOp};

use crate::recovery::EXPR_START;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression if one starts here.
    pub(crate) fn try_expr(&mut self) -> Option<NodeId> {
        if !EXPR_START.contains(self.current_kind()) {
            return None;
        }
        Some(fgl_stack::ensure_sufficient_stack(|| self.or_expr()))
    }

    /// Parse a required expression, reporting it missing as `what`.
    pub(crate) fn expect_expr(&mut self, what: &str) -> Option<NodeId> {
        let expr = self.try_expr();
        if expr.is_none() {
            self.error(self.expected_expression(what));
        }
        expr
    }

    #[cold]
    fn expected_expression(&self, what: &str) -> ParseError {
        let found = self.current_kind();
        if found == TokenKind::Eof {
            return ParseError::expected(what, found, self.current_span());
        }
        ParseError::new(
            ErrorCode::E1002,
            format!("expected {what}, found {}", found.display_name()),
            self.current_span(),
        )
        .with_context("expected an expression")
    }

    /// Right operand of `op`; reports and returns `None` when absent.
    fn operand(&mut self, op: &str, level: fn(&mut Self) -> NodeId) -> Option<NodeId> {
        if EXPR_START.contains(self.current_kind()) {
            Some(fgl_stack::ensure_sufficient_stack(|| level(self)))
        } else {
            self.error(self.expected_expression(&format!("expression after {op}")));
            None
        }
    }

    fn binary(&mut self, op: BinaryOp, lhs: NodeId, rhs: Option<NodeId>, start: Span) -> NodeId {
        let id = self.alloc(NodeKind::Binary { op, lhs, rhs }, start);
        if rhs.is_none() {
            self.mark_incomplete(id);
        }
        id
    }

    fn or_expr(&mut self) -> NodeId {
        let start = self.current_span();
        let mut lhs = self.and_expr();
        while self.eat(TokenKind::Or).is_some() {
            let rhs = self.operand("OR", Self::and_expr);
            lhs = self.binary(BinaryOp::Or, lhs, rhs, start);
        }
        lhs
    }

    fn and_expr(&mut self) -> NodeId {
        let start = self.current_span();
        let mut lhs = self.not_expr();
        while self.eat(TokenKind::And).is_some() {
            let rhs = self.operand("AND", Self::not_expr);
            lhs = self.binary(BinaryOp::And, lhs, rhs, start);
        }
        lhs
    }

    fn not_expr(&mut self) -> NodeId {
        if !self.check(TokenKind::Not) {
            return self.comparison();
        }
        let start = self.cursor.advance().span;
        let operand = self.operand("NOT", Self::not_expr);
        let id = self.alloc(
            NodeKind::Unary {
                op: UnaryOp::Not,
                operand,
            },
            start,
        );
        if operand.is_none() {
            self.mark_incomplete(id);
        }
        id
    }

    fn comparison(&mut self) -> NodeId {
        let start = self.current_span();
        let mut lhs = self.concat();
        loop {
            let token = self.cursor.current();
            let (op, alt) = match token.kind {
                TokenKind::Eq => (BinaryOp::Eq, false),
                TokenKind::EqEq => (BinaryOp::Eq, true),
                TokenKind::NotEq => (BinaryOp::NotEq, &*token.image == "<>"),
                TokenKind::Lt => (BinaryOp::Lt, false),
                TokenKind::LtEq => (BinaryOp::LtEq, false),
                TokenKind::Gt => (BinaryOp::Gt, false),
                TokenKind::GtEq => (BinaryOp::GtEq, false),
                TokenKind::Like => (BinaryOp::Like, false),
                TokenKind::Matches => (BinaryOp::Matches, false),
                TokenKind::Not => match self.cursor.peek_kind_at(1) {
                    TokenKind::Like => (BinaryOp::NotLike, false),
                    TokenKind::Matches => (BinaryOp::NotMatches, false),
                    _ => break,
                },
                TokenKind::Is => {
                    lhs = self.is_null(lhs, start);
                    continue;
                }
                _ => break,
            };
            if token.kind == TokenKind::Not {
                self.cursor.advance();
            }
            self.cursor.advance();
            let rhs = self.operand(op.symbol(), Self::concat);
            lhs = self.binary(op, lhs, rhs, start);
            if alt {
                self.ast.attributes.mark(lhs, AttributeKind::AltForm);
            }
        }
        lhs
    }

    /// `operand IS [NOT] NULL`
    fn is_null(&mut self, operand: NodeId, start: Span) -> NodeId {
        self.cursor.advance();
        let negated = self.eat(TokenKind::Not).is_some();
        let null = self.cursor.expect(TokenKind::Null);
        let complete = self.report(null).is_some();
        let id = self.alloc(NodeKind::IsNull { operand, negated }, start);
        if !complete {
            self.mark_incomplete(id);
        }
        id
    }

    fn concat(&mut self) -> NodeId {
        let start = self.current_span();
        let mut lhs = self.additive();
        while self.eat(TokenKind::Concat).is_some() {
            let rhs = self.operand("||", Self::additive);
            lhs = self.binary(BinaryOp::Concat, lhs, rhs, start);
        }
        lhs
    }

    fn additive(&mut self) -> NodeId {
        let start = self.current_span();
        let mut lhs = self.multiplicative();
        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.cursor.advance();
            let rhs = self.operand(op.symbol(), Self::multiplicative);
            lhs = self.binary(op, lhs, rhs, start);
        }
        lhs
    }

    fn multiplicative(&mut self) -> NodeId {
        let start = self.current_span();
        let mut lhs = self.power();
        loop {
            let op = match self.current_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Mod => BinaryOp::Mod,
                _ => break,
            };
            self.cursor.advance();
            let rhs = self.operand(op.symbol(), Self::power);
            lhs = self.binary(op, lhs, rhs, start);
        }
        lhs
    }

    fn power(&mut self) -> NodeId {
        let start = self.current_span();
        let lhs = self.unary();
        if self.eat(TokenKind::StarStar).is_none() {
            return lhs;
        }
        let rhs = self.operand("**", Self::power);
        self.binary(BinaryOp::Pow, lhs, rhs, start)
    }

    fn unary(&mut self) -> NodeId {
        let op = match self.current_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            _ => return self.postfix(),
        };
        let start = self.cursor.advance().span;
        let operand = self.operand(if op == UnaryOp::Neg { "-" } else { "+" }, Self::unary);
        let id = self.alloc(NodeKind::Unary { op, operand }, start);
        if operand.is_none() {
            self.mark_incomplete(id);
        }
        id
    }

    /// A `USING` format. A sign is allowed, but a trailing `CLIPPED` or
    /// `USING` applies to the whole `USING` expression.
    fn format(&mut self) -> NodeId {
        let op = match self.current_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            _ => return self.primary(),
        };
        let start = self.cursor.advance().span;
        let operand = self.operand(if op == UnaryOp::Neg { "-" } else { "+" }, Self::format);
        let id = self.alloc(NodeKind::Unary { op, operand }, start);
        if operand.is_none() {
            self.mark_incomplete(id);
        }
        id
    }

    /// `expr CLIPPED` and `expr USING "format"`, repeatable.
    fn postfix(&mut self) -> NodeId {
        let start = self.current_span();
        let mut expr = self.primary();
        loop {
            if self.eat(TokenKind::Clipped).is_some() {
                expr = self.alloc(NodeKind::Clipped { operand: expr }, start);
            } else if self.eat(TokenKind::Using).is_some() {
                let format = self.operand("USING", Self::format);
                let id = self.alloc(
                    NodeKind::Using {
                        operand: expr,
                        format,
                    },
                    start,
                );
                if format.is_none() {
                    self.mark_incomplete(id);
                }
                expr = id;
            } else {
                return expr;
            }
        }
    }

    fn primary(&mut self) -> NodeId {
        let start = self.current_span();
        match self.current_kind() {
            TokenKind::Ident => self.name_expr(),
            TokenKind::Int => self.literal(LiteralKind::Int),
            TokenKind::Decimal => self.literal(LiteralKind::Decimal),
            TokenKind::String => self.literal(LiteralKind::String),
            TokenKind::Null => self.literal(LiteralKind::Null),
            TokenKind::True => self.literal(LiteralKind::True),
            TokenKind::False => self.literal(LiteralKind::False),
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.expect_expr("expression");
                let closed = self.expect_closing(TokenKind::RParen, "parenthesized expression");
                let id = self.finish(NodeKind::Paren { inner }, start, closed);
                if inner.is_none() {
                    self.mark_incomplete(id);
                }
                id
            }
            TokenKind::Not => self.not_expr(),
            // Reached only through `operand`, which checks `EXPR_START`;
            // unary signs are consumed one level up.
            _ => {
                self.error(self.expected_expression("expression"));
                let id = self.ast.alloc(
                    NodeKind::Literal {
                        kind: LiteralKind::Null,
                        value: "".into(),
                    },
                    Span::point(start.start),
                );
                self.mark_incomplete(id);
                id
            }
        }
    }

    fn literal(&mut self, kind: LiteralKind) -> NodeId {
        let token = self.cursor.advance();
        let value: Box<str> = match kind {
            LiteralKind::String => token.value().into(),
            _ => token.image.clone(),
        };
        self.alloc(NodeKind::Literal { kind, value }, token.span)
    }
}

#[cfg(test)]
mod tests;
