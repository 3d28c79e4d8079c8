//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived tokenizer output before
//! comments are split off and kinds are mapped onto `TokenKind`.

use logos::{Lexer, Logos};

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    // Comments
    #[regex(r"#[^\n]*")]
    HashComment,
    #[regex(r"--[^\n]*")]
    DashComment,
    /// Payload is false when the closing `}` is missing.
    #[token("{", scan_brace_comment)]
    BraceComment(bool),

    // Literals
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Decimal,
    /// Payload is false when the closing quote is missing.
    #[token("\"", |lex| scan_string(lex, '"'))]
    #[token("'", |lex| scan_string(lex, '\''))]
    String(bool),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    #[token("<>")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("**")]
    StarStar,
    #[token("||")]
    Concat,

    // Keywords
    #[token("import", ignore(ascii_case))]
    Import,
    #[token("schema", ignore(ascii_case))]
    Schema,
    #[token("database", ignore(ascii_case))]
    Database,
    #[token("globals", ignore(ascii_case))]
    Globals,
    #[token("end", ignore(ascii_case))]
    End,
    #[token("define", ignore(ascii_case))]
    Define,
    #[token("constant", ignore(ascii_case))]
    Constant,
    #[token("type", ignore(ascii_case))]
    Type,
    #[token("public", ignore(ascii_case))]
    Public,
    #[token("private", ignore(ascii_case))]
    Private,
    #[token("main", ignore(ascii_case))]
    Main,
    #[token("function", ignore(ascii_case))]
    Function,
    #[token("report", ignore(ascii_case))]
    Report,
    #[token("returns", ignore(ascii_case))]
    Returns,
    #[token("returning", ignore(ascii_case))]
    Returning,
    #[token("record", ignore(ascii_case))]
    Record,
    #[token("array", ignore(ascii_case))]
    Array,
    #[token("dynamic", ignore(ascii_case))]
    Dynamic,
    #[token("of", ignore(ascii_case))]
    Of,
    #[token("dictionary", ignore(ascii_case))]
    Dictionary,
    #[token("like", ignore(ascii_case))]
    Like,
    #[token("let", ignore(ascii_case))]
    Let,
    #[token("call", ignore(ascii_case))]
    Call,
    #[token("return", ignore(ascii_case))]
    Return,
    #[token("if", ignore(ascii_case))]
    If,
    #[token("then", ignore(ascii_case))]
    Then,
    #[token("else", ignore(ascii_case))]
    Else,
    #[token("while", ignore(ascii_case))]
    While,
    #[token("for", ignore(ascii_case))]
    For,
    #[token("to", ignore(ascii_case))]
    To,
    #[token("step", ignore(ascii_case))]
    Step,
    #[token("foreach", ignore(ascii_case))]
    Foreach,
    #[token("into", ignore(ascii_case))]
    Into,
    #[token("using", ignore(ascii_case))]
    Using,
    #[token("case", ignore(ascii_case))]
    Case,
    #[token("when", ignore(ascii_case))]
    When,
    #[token("otherwise", ignore(ascii_case))]
    Otherwise,
    #[token("try", ignore(ascii_case))]
    Try,
    #[token("catch", ignore(ascii_case))]
    Catch,
    #[token("exit", ignore(ascii_case))]
    Exit,
    #[token("continue", ignore(ascii_case))]
    Continue,
    #[token("program", ignore(ascii_case))]
    Program,
    #[token("declare", ignore(ascii_case))]
    Declare,
    #[token("cursor", ignore(ascii_case))]
    Cursor,
    #[token("prepare", ignore(ascii_case))]
    Prepare,
    #[token("from", ignore(ascii_case))]
    From,
    #[token("open", ignore(ascii_case))]
    Open,
    #[token("fetch", ignore(ascii_case))]
    Fetch,
    #[token("close", ignore(ascii_case))]
    Close,
    #[token("free", ignore(ascii_case))]
    Free,
    #[token("execute", ignore(ascii_case))]
    Execute,
    #[token("display", ignore(ascii_case))]
    Display,
    #[token("message", ignore(ascii_case))]
    Message,
    #[token("error", ignore(ascii_case))]
    Error,
    #[token("initialize", ignore(ascii_case))]
    Initialize,
    #[token("null", ignore(ascii_case))]
    Null,
    #[token("whenever", ignore(ascii_case))]
    Whenever,
    #[token("sleep", ignore(ascii_case))]
    Sleep,
    #[token("menu", ignore(ascii_case))]
    Menu,
    #[token("goto", ignore(ascii_case))]
    Goto,
    #[token("label", ignore(ascii_case))]
    Label,
    #[token("defer", ignore(ascii_case))]
    Defer,
    #[token("with", ignore(ascii_case))]
    With,
    #[token("on", ignore(ascii_case))]
    On,
    #[token("select", ignore(ascii_case))]
    Select,
    #[token("insert", ignore(ascii_case))]
    Insert,
    #[token("update", ignore(ascii_case))]
    Update,
    #[token("delete", ignore(ascii_case))]
    Delete,
    #[token("and", ignore(ascii_case))]
    And,
    #[token("or", ignore(ascii_case))]
    Or,
    #[token("not", ignore(ascii_case))]
    Not,
    #[token("is", ignore(ascii_case))]
    Is,
    #[token("mod", ignore(ascii_case))]
    Mod,
    #[token("clipped", ignore(ascii_case))]
    Clipped,
    #[token("matches", ignore(ascii_case))]
    Matches,
    #[token("true", ignore(ascii_case))]
    True,
    #[token("false", ignore(ascii_case))]
    False,
}

/// Consume a string body after its opening quote.
///
/// Strings may not span lines; a backslash escapes the next character.
fn scan_string(lex: &mut Lexer<'_, RawToken>, quote: char) -> Option<bool> {
    let mut chars = lex.remainder().char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\n' => {
                lex.bump(i);
                return Some(false);
            }
            c if c == quote => {
                lex.bump(i + 1);
                return Some(true);
            }
            _ => {}
        }
    }
    let rest = lex.remainder().len();
    lex.bump(rest);
    Some(false)
}

/// Consume a `{ ... }` comment body, which may span lines.
fn scan_brace_comment(lex: &mut Lexer<'_, RawToken>) -> Option<bool> {
    match lex.remainder().find('}') {
        Some(end) => {
            lex.bump(end + 1);
            Some(true)
        }
        None => {
            let rest = lex.remainder().len();
            lex.bump(rest);
            Some(false)
        }
    }
}
