//! Recursive descent parser for FGL.
//!
//! Produces an arena `Ast` plus every syntax error found. Each construct
//! recovers locally: a missing `END x` leaves the construct incomplete and
//! parsing resumes, so one error never hides the rest of the module.

mod binder;
mod context;
mod cursor;
mod error;
mod grammar;
mod recovery;

pub use context::ParseContext;
pub use cursor::Cursor;
pub use error::ParseError;
pub use recovery::{synchronize, TokenSet};

use fgl_ir::{
    Ast, AttributeKind, AttributeValue, LanguageVersion, NodeId, NodeKind, Span, TokenKind,
    TokenList,
};

use binder::BinderStack;

/// Options controlling a parse.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Language version syntax is checked against.
    pub version: LanguageVersion,
}

impl ParseOptions {
    pub fn new(version: LanguageVersion) -> Self {
        ParseOptions { version }
    }
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    source: &'a str,
    ast: Ast,
    errors: Vec<ParseError>,
    binders: BinderStack,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, source: &'a str, options: ParseOptions) -> Self {
        let errors = tokens.errors().iter().map(ParseError::from_lex_error).collect();
        Parser {
            cursor: Cursor::new(tokens),
            source,
            ast: Ast::with_capacity(options.version, tokens.len()),
            errors,
            binders: BinderStack::default(),
        }
    }

    // Cursor delegation

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn eat(&mut self, kind: TokenKind) -> Option<Span> {
        self.cursor.eat(kind)
    }

    // Error collection

    fn error(&mut self, error: ParseError) {
        tracing::debug!(code = %error.code, span = %error.span, "{}", error.message);
        self.errors.push(error);
    }

    /// Record the error of a failed `expect`, keeping the success value.
    fn report<T>(&mut self, result: Result<T, ParseError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.error(error);
                None
            }
        }
    }

    fn version(&self) -> LanguageVersion {
        self.ast.version()
    }

    /// Report `what` at `span` unless the configured version is at least `min`.
    fn require_version(&mut self, min: LanguageVersion, what: &str, span: Span) -> bool {
        if self.version() >= min {
            return true;
        }
        self.error(
            ParseError::new(
                fgl_diagnostic::ErrorCode::E1009,
                format!(
                    "{what} requires language version {} or later (configured: {})",
                    min.as_str(),
                    self.version().as_str()
                ),
                span,
            )
            .with_context(format!("needs {}", min.as_str())),
        );
        false
    }

    // Node construction

    /// Span from `start` through the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.to(self.previous_span())
    }

    fn alloc(&mut self, kind: NodeKind, start: Span) -> NodeId {
        let span = self.span_from(start);
        self.ast.alloc(kind, span)
    }

    /// Allocate a node whose closer may be missing.
    fn finish(&mut self, kind: NodeKind, start: Span, closed: bool) -> NodeId {
        let span = self.span_from(start);
        let id = self.ast.alloc_with(kind, span, closed);
        if !closed {
            self.ast
                .attributes
                .mark(id, AttributeKind::MissingCloseGrouping);
        }
        id
    }

    /// Flag a node whose required sub-node is missing.
    fn mark_incomplete(&mut self, id: NodeId) {
        self.ast.mark_incomplete(id);
        self.ast.attributes.mark(id, AttributeKind::IncompleteNode);
    }

    fn set_attribute(&mut self, id: NodeId, kind: AttributeKind, value: AttributeValue) {
        self.ast.attributes.set(id, kind, value);
    }

    // Trivia

    /// Source text between the last consumed token and the current one.
    fn gap_before_current(&self) -> &'a str {
        let start = self.previous_span().end as usize;
        let end = self.current_span().start as usize;
        self.source.get(start..end).unwrap_or("")
    }

    fn source_text(&self, span: Span) -> &'a str {
        self.source.get(span.to_range()).unwrap_or("")
    }

    /// Consume `END <closer>`, or report it missing without consuming.
    ///
    /// Returns the whitespace between the two words when present.
    fn parse_end(&mut self, closer: TokenKind) -> Option<&'a str> {
        if self.check(TokenKind::End) && self.cursor.peek_kind_at(1) == closer {
            self.cursor.advance();
            let gap = self.gap_before_current();
            self.cursor.advance();
            return Some(gap);
        }
        let closing = format!("END {}", closer.display_name());
        let error = ParseError::missing_close(&closing, self.is_at_end(), self.current_span())
            .with_context(format!("expected {closing}"));
        self.error(error);
        None
    }

    /// Allocate a construct closed by `END <closer>`.
    fn close_construct(&mut self, kind: NodeKind, start: Span, closer: TokenKind) -> NodeId {
        let end = self.parse_end(closer);
        let id = self.finish(kind, start, end.is_some());
        if let Some(gap) = end {
            self.ast.attributes.set_preceding_whitespace(id, 0, gap);
        }
        id
    }

    /// Attach the source of tokens skipped since `from` to `owner`.
    fn record_skipped(&mut self, owner: Option<NodeId>, from: Span) {
        let Some(owner) = owner else { return };
        let text = self.source_text(self.span_from(from));
        if text.is_empty() {
            return;
        }
        let mut extra = self
            .ast
            .attributes
            .text(owner, AttributeKind::ExtraVerbatim)
            .map(str::to_owned)
            .unwrap_or_default();
        if !extra.is_empty() {
            extra.push(' ');
        }
        extra.push_str(text);
        self.set_attribute(
            owner,
            AttributeKind::ExtraVerbatim,
            AttributeValue::Text(extra.into()),
        );
    }

    // Lists

    /// Parse `item {, item}`.
    ///
    /// `item` returns `None` without consuming when nothing it accepts is
    /// present. A required list that comes out empty gets one error.
    fn comma_list<T>(
        &mut self,
        what: &str,
        required: bool,
        mut item: impl FnMut(&mut Self) -> Option<T>,
    ) -> Vec<T> {
        let mut items = Vec::new();
        loop {
            match item(self) {
                Some(value) => items.push(value),
                None if items.is_empty() => break,
                None => {
                    let error = self.cursor.make_expect_error(what);
                    self.error(error);
                    break;
                }
            }
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        if required && items.is_empty() {
            self.error(
                ParseError::empty_list(what, self.current_span())
                    .with_context(format!("expected {what}")),
            );
        }
        items
    }

    /// Run `f` with a fresh cursor-binding frame.
    fn with_binder_frame<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.binders.push();
        let result = f(self);
        self.binders.pop();
        result
    }

    /// Parse a whole module.
    #[tracing::instrument(level = "debug", skip_all, fields(tokens = self.cursor.tokens().len()))]
    pub fn parse_module(mut self) -> ParseResult {
        let root = self.module();
        self.ast.set_root(root);
        tracing::debug!(
            nodes = self.ast.len(),
            errors = self.errors.len(),
            "parsed module"
        );
        ParseResult {
            ast: self.ast,
            errors: self.errors,
        }
    }
}

/// Parse result: the tree and every syntax error, in source order per kind.
#[derive(Clone, Debug)]
pub struct ParseResult {
    pub ast: Ast,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse tokens into a module.
pub fn parse(tokens: &TokenList, source: &str, options: ParseOptions) -> ParseResult {
    Parser::new(tokens, source, options).parse_module()
}

/// Lex and parse source text.
pub fn parse_source(source: &str, options: ParseOptions) -> ParseResult {
    let tokens = fgl_lexer::lex(source);
    parse(&tokens, source, options)
}

#[cfg(test)]
mod tests;
