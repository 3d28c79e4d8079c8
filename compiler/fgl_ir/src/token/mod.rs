//! Token types for the FGL lexer.
//!
//! Keywords are case-insensitive and only the reserved words get their own
//! kind. Type names (`INTEGER`, `STRING`, ...) and clause words (`FGL`,
//! `HOLD`, `NEXT`, `ACTION`, ...) are lexed as identifiers and recognised by
//! the grammar from their text.

mod list;

pub use list::{Comment, CommentKind, LexError, LexErrorKind, TokenList};

use std::borrow::Cow;
use std::fmt;

use crate::Span;

/// A token with its span and raw source image.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Source text exactly as written, including quotes for strings.
    pub image: Box<str>,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span, image: impl Into<Box<str>>) -> Self {
        Token {
            kind,
            span,
            image: image.into(),
        }
    }

    /// Create a dummy token for testing/generated code.
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::DUMMY,
            image: Box::from(kind.display_name()),
        }
    }

    #[inline]
    pub fn category(&self) -> TokenCategory {
        self.kind.category()
    }

    /// Literal value of the token.
    ///
    /// Strings lose their delimiters and have escapes resolved; every other
    /// kind returns its image unchanged. An unterminated string keeps
    /// everything after its opening quote.
    pub fn value(&self) -> Cow<'_, str> {
        let image = &*self.image;
        let Some(quote) = image.chars().next().filter(|_| self.kind == TokenKind::String) else {
            return Cow::Borrowed(image);
        };
        let inner = if image.len() >= 2 && image.ends_with(quote) {
            &image[1..image.len() - 1]
        } else {
            &image[1..]
        };
        if !inner.contains('\\') {
            return Cow::Borrowed(inner);
        }
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        }
        Cow::Owned(out)
    }

    /// Check whether this token is an identifier spelled `word`.
    #[inline]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Ident && self.image.eq_ignore_ascii_case(word)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({}) @ {}", self.kind, self.image, self.span)
    }
}

/// Coarse token classification exposed by the token source.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Identifier,
    Keyword,
    Literal,
    Operator,
    Eof,
}

/// Token kinds for FGL.
///
/// Fieldless so that a kind fits in one byte and can index a `u128` bitset;
/// literal values stay on [`Token::image`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // Literals and names
    Ident,
    Int,
    Decimal,
    String,

    // Punctuation and operators
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Colon,
    Semicolon,
    Eq,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    StarStar,
    Concat,

    // Module structure
    Import,
    Schema,
    Database,
    Globals,
    End,
    Define,
    Constant,
    Type,
    Public,
    Private,
    Main,
    Function,
    Report,
    Returns,
    Returning,

    // Types
    Record,
    Array,
    Dynamic,
    Of,
    Dictionary,
    Like,

    // Statements
    Let,
    Call,
    Return,
    If,
    Then,
    Else,
    While,
    For,
    To,
    Step,
    Foreach,
    Into,
    Using,
    Case,
    When,
    Otherwise,
    Try,
    Catch,
    Exit,
    Continue,
    Program,
    Declare,
    Cursor,
    Prepare,
    From,
    Open,
    Fetch,
    Close,
    Free,
    Execute,
    Display,
    Message,
    Error,
    Initialize,
    Null,
    Whenever,
    Sleep,
    Menu,
    Goto,
    Label,
    Defer,
    With,
    On,

    // SQL pass-through
    Select,
    Insert,
    Update,
    Delete,

    // Expression keywords
    And,
    Or,
    Not,
    Is,
    Mod,
    Clipped,
    Matches,
    True,
    False,

    Eof,
}

// TokenSet stores kinds in a u128.
const _: () = assert!(
    (TokenKind::Eof as u8) < 128,
    "TokenKind has more variants than a u128 bitset can hold"
);

impl TokenKind {
    /// Index used by bitset-based token sets.
    #[inline]
    pub const fn discriminant_index(self) -> u8 {
        self as u8
    }

    pub const fn category(self) -> TokenCategory {
        match self {
            TokenKind::Ident => TokenCategory::Identifier,
            TokenKind::Int | TokenKind::Decimal | TokenKind::String => TokenCategory::Literal,
            TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::LBracket
            | TokenKind::RBracket
            | TokenKind::Comma
            | TokenKind::Dot
            | TokenKind::Colon
            | TokenKind::Semicolon
            | TokenKind::Eq
            | TokenKind::EqEq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Gt
            | TokenKind::GtEq
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::StarStar
            | TokenKind::Concat => TokenCategory::Operator,
            TokenKind::Eof => TokenCategory::Eof,
            _ => TokenCategory::Keyword,
        }
    }

    #[inline]
    pub const fn is_keyword(self) -> bool {
        matches!(self.category(), TokenCategory::Keyword)
    }

    /// Name used in "expected X, found Y" messages.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer",
            TokenKind::Decimal => "decimal",
            TokenKind::String => "string",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::StarStar => "**",
            TokenKind::Concat => "||",
            TokenKind::Import => "IMPORT",
            TokenKind::Schema => "SCHEMA",
            TokenKind::Database => "DATABASE",
            TokenKind::Globals => "GLOBALS",
            TokenKind::End => "END",
            TokenKind::Define => "DEFINE",
            TokenKind::Constant => "CONSTANT",
            TokenKind::Type => "TYPE",
            TokenKind::Public => "PUBLIC",
            TokenKind::Private => "PRIVATE",
            TokenKind::Main => "MAIN",
            TokenKind::Function => "FUNCTION",
            TokenKind::Report => "REPORT",
            TokenKind::Returns => "RETURNS",
            TokenKind::Returning => "RETURNING",
            TokenKind::Record => "RECORD",
            TokenKind::Array => "ARRAY",
            TokenKind::Dynamic => "DYNAMIC",
            TokenKind::Of => "OF",
            TokenKind::Dictionary => "DICTIONARY",
            TokenKind::Like => "LIKE",
            TokenKind::Let => "LET",
            TokenKind::Call => "CALL",
            TokenKind::Return => "RETURN",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::To => "TO",
            TokenKind::Step => "STEP",
            TokenKind::Foreach => "FOREACH",
            TokenKind::Into => "INTO",
            TokenKind::Using => "USING",
            TokenKind::Case => "CASE",
            TokenKind::When => "WHEN",
            TokenKind::Otherwise => "OTHERWISE",
            TokenKind::Try => "TRY",
            TokenKind::Catch => "CATCH",
            TokenKind::Exit => "EXIT",
            TokenKind::Continue => "CONTINUE",
            TokenKind::Program => "PROGRAM",
            TokenKind::Declare => "DECLARE",
            TokenKind::Cursor => "CURSOR",
            TokenKind::Prepare => "PREPARE",
            TokenKind::From => "FROM",
            TokenKind::Open => "OPEN",
            TokenKind::Fetch => "FETCH",
            TokenKind::Close => "CLOSE",
            TokenKind::Free => "FREE",
            TokenKind::Execute => "EXECUTE",
            TokenKind::Display => "DISPLAY",
            TokenKind::Message => "MESSAGE",
            TokenKind::Error => "ERROR",
            TokenKind::Initialize => "INITIALIZE",
            TokenKind::Null => "NULL",
            TokenKind::Whenever => "WHENEVER",
            TokenKind::Sleep => "SLEEP",
            TokenKind::Menu => "MENU",
            TokenKind::Goto => "GOTO",
            TokenKind::Label => "LABEL",
            TokenKind::Defer => "DEFER",
            TokenKind::With => "WITH",
            TokenKind::On => "ON",
            TokenKind::Select => "SELECT",
            TokenKind::Insert => "INSERT",
            TokenKind::Update => "UPDATE",
            TokenKind::Delete => "DELETE",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Is => "IS",
            TokenKind::Mod => "MOD",
            TokenKind::Clipped => "CLIPPED",
            TokenKind::Matches => "MATCHES",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
