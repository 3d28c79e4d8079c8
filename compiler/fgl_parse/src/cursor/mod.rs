//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.
//! The cursor never moves past the trailing `Eof` token, so every lookahead
//! is total.

use fgl_diagnostic::ErrorCode;
use fgl_ir::{Ident, Span, Token, TokenCategory, TokenKind, TokenList};
use tracing::trace;

use crate::ParseError;

/// Cursor for navigating tokens.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the token stream.
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor { tokens, pos: 0 }
    }

    pub fn tokens(&self) -> &'a TokenList {
        self.tokens
    }

    /// Current position in the token stream.
    ///
    /// Compare positions before and after a parse routine to tell whether it
    /// consumed anything.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get the current token.
    ///
    /// Invariant: the position is always in `0..tokens.len()` and the last
    /// token is `Eof`.
    #[inline]
    pub fn current(&self) -> &'a Token {
        &self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token, or a point at 0 before the first.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::point(0)
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        self.check(TokenKind::Ident)
    }

    /// Check for an identifier spelled `word`, case-insensitively.
    ///
    /// Contextual keywords (`FGL`, `ACTION`, `SCROLL`, ...) are plain
    /// identifiers to the lexer.
    #[inline]
    pub fn check_word(&self, word: &str) -> bool {
        self.current().is_word(word)
    }

    /// Token at offset `n` from the current position; `Eof` past the end.
    pub fn peek_at(&self, n: usize) -> &'a Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    #[inline]
    pub fn peek_kind_at(&self, n: usize) -> TokenKind {
        self.peek_at(n).kind
    }

    /// Category of the token `n` ahead.
    #[inline]
    pub fn peek_category_at(&self, n: usize) -> TokenCategory {
        self.peek_kind_at(n).category()
    }

    /// Advance to the next token, returning the consumed one.
    ///
    /// At `Eof` the cursor stays put and keeps returning `Eof`.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        trace!(
            pos = self.pos,
            kind = %token.kind.display_name(),
            span_start = token.span.start,
            span_end = token.span.end,
            "advance"
        );
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it is `kind`.
    #[inline]
    pub fn eat(&mut self, kind: TokenKind) -> Option<Span> {
        if self.check(kind) {
            Some(self.advance().span)
        } else {
            None
        }
    }

    /// Consume the current token if it is the identifier `word`.
    #[inline]
    pub fn eat_word(&mut self, word: &str) -> Option<Span> {
        if self.check_word(word) {
            Some(self.advance().span)
        } else {
            None
        }
    }

    /// Expect and consume a token of the given kind.
    ///
    /// Split into inline happy path + `#[cold]` error path.
    #[inline]
    pub fn expect(&mut self, kind: TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.make_expect_error(kind.display_name()))
        }
    }

    /// Expect and consume the contextual keyword `word`.
    pub fn expect_word(&mut self, word: &'static str) -> Result<Span, ParseError> {
        match self.eat_word(word) {
            Some(span) => Ok(span),
            None => Err(self.make_expect_error(word)),
        }
    }

    #[cold]
    #[inline(never)]
    pub fn make_expect_error(&self, what: &str) -> ParseError {
        ParseError::expected(what, self.current_kind(), self.current_span())
            .with_context(format!("expected {what}"))
    }

    /// Expect and consume an identifier.
    #[inline]
    pub fn expect_ident(&mut self) -> Result<Ident, ParseError> {
        if self.check_ident() {
            let token = self.advance();
            Ok(Ident::new(&*token.image, token.span))
        } else {
            Err(self.make_ident_error())
        }
    }

    /// Expect an identifier, accepting keywords too.
    ///
    /// Member names after `.` may be spelled like keywords (`ch.close()`).
    pub fn expect_ident_or_keyword(&mut self) -> Result<Ident, ParseError> {
        let kind = self.current_kind();
        if kind == TokenKind::Ident || kind.is_keyword() {
            let token = self.advance();
            Ok(Ident::new(&*token.image, token.span))
        } else {
            Err(self.make_ident_error())
        }
    }

    #[cold]
    #[inline(never)]
    fn make_ident_error(&self) -> ParseError {
        let found = self.current_kind();
        if found == TokenKind::Eof {
            return ParseError::expected("identifier", found, self.current_span());
        }
        ParseError::new(
            ErrorCode::E1004,
            format!("expected identifier, found {}", found.display_name()),
            self.current_span(),
        )
        .with_context("expected identifier")
    }
}
