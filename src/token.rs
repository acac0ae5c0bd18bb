//! Token vocabulary of the formula language.

use core::fmt;

use snafu::OptionExt;

use crate::error::{Error, InvalidLiteralSnafu, UnexpectedTokenSnafu};

/// Classification of a single token.
///
/// The vocabulary is closed: anything the lexer can't place in one of the
/// other kinds becomes [`TokenKind::Malformed`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// No more tokens, only whitespace (if anything) was left.
    End,
    /// Unclassifiable text.
    Malformed,
    Plus,
    Minus,
    Times,
    Divide,
    Modulo,
    /// Bitwise NOT, `~`.
    Not,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Open,
    Close,
    /// `0x` prefixed literal.
    Hex,
    /// Integer literal in base 10.
    Decimal,
    /// Base 10 literal with a decimal point.
    Fraction,
    /// `BYTEn` / `Bn`, a byte of the received payload.
    SourceByte(u8),
    /// `PBYTEn` / `Pn`, a byte of the command being composed.
    DestByte(u8),
    /// `BITPOS` / `BP`
    BitPos,
    /// `VALUE` / `V`, the caller supplied pass-through value.
    Value,
}

impl TokenKind {
    /// Numeric code of the token in the legacy device-definition format.
    pub const fn code(self) -> i32 {
        use TokenKind::*;
        match self {
            End => 0,
            Malformed => -100,
            Hex => 8,
            Decimal => 11,
            Fraction => 12,
            Plus => 100,
            Minus => 101,
            Times => 102,
            Divide => 103,
            Modulo => 104,
            Open => 110,
            Close => 111,
            SourceByte(index) => 200 + index as i32,
            DestByte(index) => 210 + index as i32,
            BitPos => 220,
            Value => 300,
            Not => 400,
            And => 401,
            Or => 402,
            Xor => 403,
            Shl => 404,
            Shr => 405,
        }
    }

    /// Operators handled at the multiplicative level of the integer grammar.
    pub(crate) const fn is_int_term_op(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Times | Divide | Modulo | And | Or | Xor | Shl | Shr
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenKind::*;
        match self {
            End => write!(f, "end of input"),
            Malformed => write!(f, "malformed token"),
            Plus => write!(f, "'+'"),
            Minus => write!(f, "'-'"),
            Times => write!(f, "'*'"),
            Divide => write!(f, "'/'"),
            Modulo => write!(f, "'%'"),
            Not => write!(f, "'~'"),
            And => write!(f, "'&'"),
            Or => write!(f, "'|'"),
            Xor => write!(f, "'^'"),
            Shl => write!(f, "'<<'"),
            Shr => write!(f, "'>>'"),
            Open => write!(f, "'('"),
            Close => write!(f, "')'"),
            Hex => write!(f, "hex literal"),
            Decimal | Fraction => write!(f, "number"),
            SourceByte(index) => write!(f, "BYTE{}", index),
            DestByte(index) => write!(f, "PBYTE{}", index),
            BitPos => write!(f, "BITPOS"),
            Value => write!(f, "VALUE"),
        }
    }
}

/// One token read from a formula.
///
/// `len` is the number of bytes the token consumed from the cursor,
/// including leading whitespace, so that `Cursor::push_back(len)` restores
/// the position from before the read.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// The matched text, without leading whitespace.
    pub lexeme: &'a str,
    /// Byte offset of `lexeme` in the formula.
    pub offset: usize,
    pub len: usize,
}

impl<'a> Token<'a> {
    /// First character of the lexeme, used in error reports.
    pub(crate) fn first_char(&self) -> char {
        self.lexeme.chars().next().unwrap_or('\0')
    }

    /// Value of a `Hex` token, without sign interpretation.
    pub(crate) fn hex_value(&self) -> Result<u32, Error> {
        let digits = self.lexeme.get(2..).unwrap_or("");
        u32::from_str_radix(digits, 16)
            .ok()
            .context(InvalidLiteralSnafu {
                position: self.offset,
            })
    }

    pub(crate) fn malformed(&self) -> Error {
        Error::MalformedToken {
            position: self.offset,
            found: self.first_char(),
        }
    }

    /// Error for a token that can't start a factor.
    pub(crate) fn unexpected<T>(&self) -> Result<T, Error> {
        match self.kind {
            TokenKind::Malformed => Err(self.malformed()),
            found => UnexpectedTokenSnafu {
                position: self.offset,
                found,
            }
            .fail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TokenKind::*;

    #[test]
    fn test_codes() {
        assert_eq!(End.code(), 0);
        assert_eq!(Malformed.code(), -100);
        assert_eq!(SourceByte(0).code(), 200);
        assert_eq!(SourceByte(9).code(), 209);
        assert_eq!(DestByte(3).code(), 213);
        assert_eq!(Shr.code(), 405);
    }

    #[test]
    fn test_int_term_ops() {
        for kind in [Times, Divide, Modulo, And, Or, Xor, Shl, Shr] {
            assert!(kind.is_int_term_op());
        }
        for kind in [Plus, Minus, Not, Open, Close, End, Value] {
            assert!(!kind.is_int_term_op());
        }
    }
}
