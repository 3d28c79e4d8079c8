//! FGL IR - syntax tree and token types.
//!
//! This crate contains the data structures shared by every front-end pass:
//! - Spans for source locations
//! - Identifiers that compare case-insensitively but keep their spelling
//! - Language versions and version windows
//! - Tokens and `TokenList` for lexer output
//! - The arena AST (`Ast`, `NodeId`, `NodeKind`)
//! - The per-AST `AttributeStore` for trivia and error metadata
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: no `Box<Node>`, children are `NodeId(u32)` indices
//! - **Envelope + Sum Type**: span and completeness live on `Node`, the
//!   construct-specific fields live on `NodeKind`
//! - **Optional Metadata Out Of Band**: anything only a minority of nodes
//!   carries goes in the `AttributeStore`, not in a node field

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod attributes;
mod ident;
mod span;
mod token;
mod version;

pub use ast::{
    Access, Ast, BinaryOp, CursorSource, DeferKind, FetchDirection, FunctionKind, ImportKind,
    LiteralKind, LoopKind, MenuOptionKind, NameSuffix, Node, NodeId, NodeKind, ScalarKind, SqlVerb,
    UnaryOp, WheneverAction, WheneverCondition,
};
pub use attributes::{AttributeKind, AttributeStore, AttributeValue, WHITESPACE_SLOTS};
pub use ident::Ident;
pub use span::{Span, SpanError};
pub use token::{
    Comment, CommentKind, LexError, LexErrorKind, Token, TokenCategory, TokenKind, TokenList,
};
pub use version::{LanguageVersion, VersionWindow};
