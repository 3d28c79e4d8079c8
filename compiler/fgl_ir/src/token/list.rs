//! Token stream produced by the lexer.

use std::ops::Index;

use crate::{Span, Token, TokenKind};

/// Comment flavour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `# ...` to end of line.
    Hash,
    /// `-- ...` to end of line.
    DoubleDash,
    /// `{ ... }`, may span lines.
    Brace,
}

/// A comment kept out of the token stream.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Comment {
    pub kind: CommentKind,
    pub span: Span,
    /// Full comment text including its delimiters.
    pub text: Box<str>,
}

impl Comment {
    /// Text between the delimiters, trimmed.
    pub fn content(&self) -> &str {
        let text = &*self.text;
        let inner = match self.kind {
            CommentKind::Hash => text.strip_prefix('#').unwrap_or(text),
            CommentKind::DoubleDash => text.strip_prefix("--").unwrap_or(text),
            CommentKind::Brace => text
                .strip_prefix('{')
                .and_then(|t| t.strip_suffix('}'))
                .unwrap_or(text),
        };
        inner.trim()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    InvalidCharacter,
    UnterminatedString,
    UnterminatedComment,
}

/// A lexical problem found while tokenizing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Tokens, comments and lexical errors for one module.
///
/// Invariant: the last token is always `Eof`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TokenList {
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    errors: Vec<LexError>,
}

impl TokenList {
    /// Build a list, appending the `Eof` token at `end`.
    pub fn new(
        mut tokens: Vec<Token>,
        comments: Vec<Comment>,
        errors: Vec<LexError>,
        end: u32,
    ) -> Self {
        tokens.push(Token::new(TokenKind::Eof, Span::point(end), ""));
        TokenList {
            tokens,
            comments,
            errors,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the module has no tokens besides `Eof`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// The trailing `Eof` token.
    #[inline]
    pub fn eof(&self) -> &Token {
        &self.tokens[self.tokens.len() - 1]
    }

    #[inline]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Comments lying entirely inside `[start, end)`.
    pub fn comments_between(&self, start: u32, end: u32) -> &[Comment] {
        let from = self.comments.partition_point(|c| c.span.start < start);
        let to = self.comments.partition_point(|c| c.span.end <= end);
        if from < to {
            &self.comments[from..to]
        } else {
            &[]
        }
    }

    #[inline]
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}
