//! Lexer for FGL using logos.
//!
//! Produces a `TokenList`: significant tokens ending in `Eof`, comments in a
//! side list (region markers and documentation live there), and lexical
//! errors for the parser to report.

mod raw_token;

use logos::Logos;

use fgl_ir::{Comment, CommentKind, LexError, LexErrorKind, Span, Token, TokenKind, TokenList};
use raw_token::RawToken;

/// Lex source code into a `TokenList`.
#[tracing::instrument(level = "trace", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> TokenList {
    let mut tokens = Vec::with_capacity(source.len() / 5);
    let mut comments = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        let slice = lexer.slice();

        match result {
            Ok(RawToken::HashComment) => comments.push(comment(CommentKind::Hash, span, slice)),
            Ok(RawToken::DashComment) => {
                comments.push(comment(CommentKind::DoubleDash, span, slice));
            }
            Ok(RawToken::BraceComment(terminated)) => {
                if !terminated {
                    errors.push(LexError {
                        kind: LexErrorKind::UnterminatedComment,
                        span,
                    });
                }
                comments.push(comment(CommentKind::Brace, span, slice));
            }
            Ok(RawToken::String(terminated)) => {
                if !terminated {
                    errors.push(LexError {
                        kind: LexErrorKind::UnterminatedString,
                        span,
                    });
                }
                tokens.push(Token::new(TokenKind::String, span, slice));
            }
            Ok(raw) => {
                if let Some(kind) = convert_token(raw) {
                    tokens.push(Token::new(kind, span, slice));
                }
            }
            Err(()) => errors.push(LexError {
                kind: LexErrorKind::InvalidCharacter,
                span,
            }),
        }
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    tracing::trace!(
        tokens = tokens.len(),
        comments = comments.len(),
        errors = errors.len(),
        "lexed"
    );
    TokenList::new(tokens, comments, errors, end)
}

fn comment(kind: CommentKind, span: Span, text: &str) -> Comment {
    Comment {
        kind,
        span,
        text: text.into(),
    }
}

/// Map a raw token onto its `TokenKind`; comments have none.
fn convert_token(raw: RawToken) -> Option<TokenKind> {
    let kind = match raw {
        RawToken::HashComment | RawToken::DashComment | RawToken::BraceComment(_) => {
            return None;
        }
        RawToken::Int => TokenKind::Int,
        RawToken::Decimal => TokenKind::Decimal,
        RawToken::String(_) => TokenKind::String,
        RawToken::Ident => TokenKind::Ident,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::StarStar => TokenKind::StarStar,
        RawToken::Concat => TokenKind::Concat,

        RawToken::Import => TokenKind::Import,
        RawToken::Schema => TokenKind::Schema,
        RawToken::Database => TokenKind::Database,
        RawToken::Globals => TokenKind::Globals,
        RawToken::End => TokenKind::End,
        RawToken::Define => TokenKind::Define,
        RawToken::Constant => TokenKind::Constant,
        RawToken::Type => TokenKind::Type,
        RawToken::Public => TokenKind::Public,
        RawToken::Private => TokenKind::Private,
        RawToken::Main => TokenKind::Main,
        RawToken::Function => TokenKind::Function,
        RawToken::Report => TokenKind::Report,
        RawToken::Returns => TokenKind::Returns,
        RawToken::Returning => TokenKind::Returning,
        RawToken::Record => TokenKind::Record,
        RawToken::Array => TokenKind::Array,
        RawToken::Dynamic => TokenKind::Dynamic,
        RawToken::Of => TokenKind::Of,
        RawToken::Dictionary => TokenKind::Dictionary,
        RawToken::Like => TokenKind::Like,
        RawToken::Let => TokenKind::Let,
        RawToken::Call => TokenKind::Call,
        RawToken::Return => TokenKind::Return,
        RawToken::If => TokenKind::If,
        RawToken::Then => TokenKind::Then,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,
        RawToken::To => TokenKind::To,
        RawToken::Step => TokenKind::Step,
        RawToken::Foreach => TokenKind::Foreach,
        RawToken::Into => TokenKind::Into,
        RawToken::Using => TokenKind::Using,
        RawToken::Case => TokenKind::Case,
        RawToken::When => TokenKind::When,
        RawToken::Otherwise => TokenKind::Otherwise,
        RawToken::Try => TokenKind::Try,
        RawToken::Catch => TokenKind::Catch,
        RawToken::Exit => TokenKind::Exit,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Program => TokenKind::Program,
        RawToken::Declare => TokenKind::Declare,
        RawToken::Cursor => TokenKind::Cursor,
        RawToken::Prepare => TokenKind::Prepare,
        RawToken::From => TokenKind::From,
        RawToken::Open => TokenKind::Open,
        RawToken::Fetch => TokenKind::Fetch,
        RawToken::Close => TokenKind::Close,
        RawToken::Free => TokenKind::Free,
        RawToken::Execute => TokenKind::Execute,
        RawToken::Display => TokenKind::Display,
        RawToken::Message => TokenKind::Message,
        RawToken::Error => TokenKind::Error,
        RawToken::Initialize => TokenKind::Initialize,
        RawToken::Null => TokenKind::Null,
        RawToken::Whenever => TokenKind::Whenever,
        RawToken::Sleep => TokenKind::Sleep,
        RawToken::Menu => TokenKind::Menu,
        RawToken::Goto => TokenKind::Goto,
        RawToken::Label => TokenKind::Label,
        RawToken::Defer => TokenKind::Defer,
        RawToken::With => TokenKind::With,
        RawToken::On => TokenKind::On,
        RawToken::Select => TokenKind::Select,
        RawToken::Insert => TokenKind::Insert,
        RawToken::Update => TokenKind::Update,
        RawToken::Delete => TokenKind::Delete,
        RawToken::And => TokenKind::And,
        RawToken::Or => TokenKind::Or,
        RawToken::Not => TokenKind::Not,
        RawToken::Is => TokenKind::Is,
        RawToken::Mod => TokenKind::Mod,
        RawToken::Clipped => TokenKind::Clipped,
        RawToken::Matches => TokenKind::Matches,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
    };
    Some(kind)
}
