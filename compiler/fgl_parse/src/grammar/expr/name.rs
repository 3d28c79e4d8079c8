//! Name paths: `base {.member | .* | [index] | (args)}`.

use fgl_ir::{Ident, NameSuffix, NodeId, NodeKind, TokenKind};

use crate::Parser;

impl Parser<'_> {
    /// Parse a name path if one starts here.
    pub(crate) fn try_name(&mut self) -> Option<NodeId> {
        self.cursor.check_ident().then(|| self.name_expr())
    }

    /// Parse a name path; the current token is its base identifier.
    pub(crate) fn name_expr(&mut self) -> NodeId {
        let token = self.cursor.advance();
        let start = token.span;
        let base = Ident::new(&*token.image, token.span);
        let mut suffixes = Vec::new();
        let mut closed = true;
        let mut complete = true;

        loop {
            match self.current_kind() {
                TokenKind::Dot => {
                    self.cursor.advance();
                    if self.eat(TokenKind::Star).is_some() {
                        suffixes.push(NameSuffix::AllMembers);
                        continue;
                    }
                    match self.cursor.expect_ident_or_keyword() {
                        Ok(member) => suffixes.push(NameSuffix::Member(member)),
                        Err(error) => {
                            self.error(error);
                            complete = false;
                            break;
                        }
                    }
                }
                TokenKind::LBracket => {
                    self.cursor.advance();
                    let index = self.comma_list("index expression", true, Self::try_expr);
                    complete &= !index.is_empty();
                    suffixes.push(NameSuffix::Index(index));
                    if !self.expect_closing(TokenKind::RBracket, "index") {
                        closed = false;
                        break;
                    }
                }
                TokenKind::LParen => {
                    self.cursor.advance();
                    let args = self.comma_list("argument", false, Self::try_expr);
                    suffixes.push(NameSuffix::Call(args));
                    if !self.expect_closing(TokenKind::RParen, "argument list") {
                        closed = false;
                        break;
                    }
                }
                _ => break,
            }
        }

        let id = self.finish(NodeKind::Name { base, suffixes }, start, closed);
        if !complete {
            self.mark_incomplete(id);
        }
        id
    }
}
