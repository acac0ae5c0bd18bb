use snafu::ensure;

use crate::error::{Error, UnclosedGroupSnafu};
use crate::lexer::lex;
use crate::token::{Token, TokenKind};

/// Read position within a formula.
///
/// Evaluation reads tokens one at a time. A grammar level that reads a token
/// it doesn't handle hands it back with [`push_back()`](Self::push_back())
/// before returning, which is the only lookahead the evaluators use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub const fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Byte offset of the next unread character.
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// The unread part of the formula.
    pub fn remaining(&self) -> &'a str {
        self.text.get(self.pos..).unwrap_or("")
    }

    /// Read one token and advance past it. At the end of the text this keeps
    /// returning `TokenKind::End`.
    pub fn next_token(&mut self) -> Token<'a> {
        let token = lex(self.remaining(), self.pos);
        self.pos += token.len;
        token
    }

    /// Move back by `len` bytes, `len` being the length reported by the
    /// most recent `next_token()`.
    ///
    /// Panics if this would move before the start of the formula.
    pub fn push_back(&mut self, len: usize) {
        assert!(len <= self.pos, "push_back past start of formula");
        self.pos -= len;
    }

    /// Consume the `)` ending a group.
    pub(crate) fn close_group(&mut self) -> Result<(), Error> {
        let token = self.next_token();
        ensure!(
            token.kind == TokenKind::Close,
            UnclosedGroupSnafu {
                position: token.offset,
                found: token.kind,
            }
        );
        Ok(())
    }
}
