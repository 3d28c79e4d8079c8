//! Error recovery for the parser.
//!
//! Provides token sets and synchronization for continuing parsing after errors.
//! Uses bitset-based O(1) membership testing.

use fgl_ir::TokenKind;

use crate::cursor::Cursor;

/// A set of token kinds using bitset representation for O(1) membership testing.
///
/// Each bit in the u128 corresponds to a `TokenKind` discriminant index; the
/// token kind enum is kept under 128 variants for this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TokenSet(u128);

impl TokenSet {
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn single(kind: TokenKind) -> Self {
        Self(1u128 << kind.discriminant_index())
    }

    /// Add a token kind to this set (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u128 << kind.discriminant_index()))
    }

    #[inline]
    #[must_use]
    pub const fn without(self, kind: TokenKind) -> Self {
        Self(self.0 & !(1u128 << kind.discriminant_index()))
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        (self.0 & (1u128 << kind.discriminant_index())) != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn count(&self) -> u32 {
        self.0.count_ones()
    }
}

/// Keywords that begin a statement inside a routine body.
pub const STMT_START: TokenSet = TokenSet::new()
    .with(TokenKind::Define)
    .with(TokenKind::Constant)
    .with(TokenKind::Type)
    .with(TokenKind::Let)
    .with(TokenKind::Call)
    .with(TokenKind::Return)
    .with(TokenKind::If)
    .with(TokenKind::While)
    .with(TokenKind::For)
    .with(TokenKind::Foreach)
    .with(TokenKind::Case)
    .with(TokenKind::Try)
    .with(TokenKind::Menu)
    .with(TokenKind::Exit)
    .with(TokenKind::Continue)
    .with(TokenKind::Declare)
    .with(TokenKind::Prepare)
    .with(TokenKind::Open)
    .with(TokenKind::Fetch)
    .with(TokenKind::Close)
    .with(TokenKind::Free)
    .with(TokenKind::Execute)
    .with(TokenKind::Display)
    .with(TokenKind::Message)
    .with(TokenKind::Error)
    .with(TokenKind::Initialize)
    .with(TokenKind::Whenever)
    .with(TokenKind::Sleep)
    .with(TokenKind::Defer)
    .with(TokenKind::Goto)
    .with(TokenKind::Label)
    .with(TokenKind::Database)
    .with(TokenKind::Select)
    .with(TokenKind::Insert)
    .with(TokenKind::Update)
    .with(TokenKind::Delete);

/// Keywords that begin a module-level item.
pub const ITEM_START: TokenSet = TokenSet::new()
    .with(TokenKind::Import)
    .with(TokenKind::Schema)
    .with(TokenKind::Database)
    .with(TokenKind::Globals)
    .with(TokenKind::Define)
    .with(TokenKind::Constant)
    .with(TokenKind::Type)
    .with(TokenKind::Main)
    .with(TokenKind::Function)
    .with(TokenKind::Report)
    .with(TokenKind::Public)
    .with(TokenKind::Private);

/// Keywords that can only open a new routine; a routine body that meets one
/// has lost its `END`.
pub const ROUTINE_START: TokenSet = TokenSet::new()
    .with(TokenKind::Main)
    .with(TokenKind::Function)
    .with(TokenKind::Report)
    .with(TokenKind::Public)
    .with(TokenKind::Private)
    .with(TokenKind::Globals)
    .with(TokenKind::Import);

/// Tokens that can start an expression.
pub const EXPR_START: TokenSet = TokenSet::new()
    .with(TokenKind::Ident)
    .with(TokenKind::Int)
    .with(TokenKind::Decimal)
    .with(TokenKind::String)
    .with(TokenKind::Null)
    .with(TokenKind::True)
    .with(TokenKind::False)
    .with(TokenKind::LParen)
    .with(TokenKind::Minus)
    .with(TokenKind::Plus)
    .with(TokenKind::Not);

/// Tokens that end an embedded SQL statement wherever they appear.
///
/// Statement keywords end SQL only at the start of a line, since column
/// names such as `type` or `message` collide with them mid-statement.
pub const SQL_END: TokenSet = ROUTINE_START
    .with(TokenKind::End)
    .with(TokenKind::Else)
    .with(TokenKind::When)
    .with(TokenKind::Otherwise)
    .with(TokenKind::Catch)
    .with(TokenKind::Eof);

/// Advance the cursor until reaching a token in the recovery set or EOF.
///
/// Returns the number of tokens skipped.
pub fn synchronize(cursor: &mut Cursor<'_>, recovery: TokenSet) -> usize {
    let start = cursor.position();
    while !cursor.is_at_end() && !recovery.contains(cursor.current_kind()) {
        cursor.advance();
    }
    let skipped = cursor.position() - start;
    if skipped > 0 {
        tracing::debug!(skipped, "recovery skipped tokens");
    }
    skipped
}

#[cfg(test)]
mod tests;
