//! Parse context for statement blocks.
//!
//! A block needs to know which constructs enclose it: which `EXIT x` and
//! `CONTINUE x` targets are legal, which `END x` closers belong to an open
//! construct, and which keywords end the block without closing anything
//! (`ELSE`, `WHEN`, `CATCH`, ...). The context is `Copy` and threaded by
//! value, so leaving a construct restores the outer state for free.

use bitflags::bitflags;
use fgl_ir::{LoopKind, TokenKind};

use crate::recovery::{TokenSet, ROUTINE_START, STMT_START};

bitflags! {
    /// Constructs enclosing the current statement.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Enclosing: u8 {
        const WHILE = 1 << 0;
        const FOR = 1 << 1;
        const FOREACH = 1 << 2;
        const CASE = 1 << 3;
        const MENU = 1 << 4;
    }
}

impl Enclosing {
    fn of(kind: LoopKind) -> Self {
        match kind {
            LoopKind::While => Enclosing::WHILE,
            LoopKind::For => Enclosing::FOR,
            LoopKind::Foreach => Enclosing::FOREACH,
            LoopKind::Case => Enclosing::CASE,
            LoopKind::Menu => Enclosing::MENU,
            LoopKind::Program => Enclosing::empty(),
        }
    }
}

/// State threaded through block parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseContext {
    enclosing: Enclosing,
    /// Keywords that may follow `END` to close an open construct.
    enders: TokenSet,
    /// Keywords that end the current block.
    stops: TokenSet,
    /// Inside a `MENU`, where `COMMAND`, `ON ACTION` and `BEFORE MENU` open arms.
    menu_arms: bool,
}

impl ParseContext {
    /// Context for the body of a routine closed by `END <ender>`.
    pub const fn routine(ender: TokenKind) -> Self {
        ParseContext {
            enclosing: Enclosing::empty(),
            enders: TokenSet::single(ender),
            stops: ROUTINE_START,
            menu_arms: false,
        }
    }

    /// Context for the items of a `GLOBALS ... END GLOBALS` block.
    pub const fn globals() -> Self {
        ParseContext::routine(TokenKind::Globals)
    }

    /// Enter a construct closed by `END <ender>`.
    #[must_use]
    pub fn entering(self, construct: Option<LoopKind>, ender: TokenKind) -> Self {
        ParseContext {
            enclosing: construct.map_or(self.enclosing, |k| self.enclosing | Enclosing::of(k)),
            enders: self.enders.with(ender),
            menu_arms: false,
            ..self
        }
    }

    /// Also end blocks at `kind`.
    #[must_use]
    pub const fn stopping_at(self, kind: TokenKind) -> Self {
        ParseContext {
            stops: self.stops.with(kind),
            ..self
        }
    }

    #[must_use]
    pub const fn with_menu_arms(self) -> Self {
        ParseContext {
            menu_arms: true,
            ..self
        }
    }

    #[inline]
    pub const fn in_menu(self) -> bool {
        self.menu_arms
    }

    /// Whether `END <kind>` closes an open construct.
    #[inline]
    pub const fn closes(self, kind: TokenKind) -> bool {
        self.enders.contains(kind)
    }

    #[inline]
    pub const fn stops_at(self, kind: TokenKind) -> bool {
        self.stops.contains(kind)
    }

    /// Where statement-level recovery may resume.
    pub const fn recovery(self) -> TokenSet {
        STMT_START.union(self.stops).with(TokenKind::End)
    }

    /// Whether `EXIT <kind>` is legal here. `EXIT PROGRAM` always is.
    pub fn allows_exit(self, kind: LoopKind) -> bool {
        kind == LoopKind::Program || self.enclosing.contains(Enclosing::of(kind))
    }

    /// Whether `CONTINUE <kind>` is legal here. `CASE` and `PROGRAM` never are.
    pub fn allows_continue(self, kind: LoopKind) -> bool {
        !matches!(kind, LoopKind::Case | LoopKind::Program)
            && self.enclosing.contains(Enclosing::of(kind))
    }
}

#[cfg(test)]
mod tests;
