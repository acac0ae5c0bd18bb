//! Integer formulas, used to pack values into command bytes bit by bit.
//!
//! ```text
//! expression := [+|-|~] term { (+|-|~) term }
//! term       := factor { (*|/|%|&|'|'|^|<<|>>) factor }
//! factor     := number | hex | BYTEn | PBYTEn | BITPOS | ~factor | ( expression )
//! ```
//!
//! All term operators share one precedence level and chain left to right.
//! A `~` between terms complements the following term, which is then added
//! to the sum; existing device definitions depend on this.

use core::convert::TryFrom;

use snafu::{ensure, OptionExt};

use crate::buffer::ByteWindow;
use crate::cursor::Cursor;
use crate::error::{
    DivisionByZeroSnafu, Error, InvalidLiteralSnafu, ShiftOutOfRangeSnafu, UnknownOperatorSnafu,
};
use crate::token::{Token, TokenKind};

/// Evaluate the integer expression at `cursor`.
///
/// `source` backs the `BYTEn` references and `dest` the `PBYTEn` references,
/// both are copied into a [`ByteWindow`]. `bit_pos` is substituted for
/// `BITPOS`. The cursor is left right after the expression.
/// # Errors
/// Returns the first error found, including division by zero and
/// out of range shifts.
pub fn eval_int(
    cursor: &mut Cursor<'_>,
    source: &[u8],
    bit_pos: u8,
    dest: &[u8],
) -> Result<i32, Error> {
    log::trace!("eval_int({:?}, bit_pos={})", cursor.remaining(), bit_pos);
    let eval = IntEval {
        source: ByteWindow::new(source),
        dest: ByteWindow::new(dest),
        bit_pos,
    };
    eval.expression(cursor).map_err(|err| {
        log::debug!("integer formula failed: {}", err);
        err
    })
}

struct IntEval {
    source: ByteWindow,
    dest: ByteWindow,
    bit_pos: u8,
}

impl IntEval {
    fn expression(&self, cursor: &mut Cursor<'_>) -> Result<i32, Error> {
        let token = cursor.next_token();
        let mut sum = match token.kind {
            TokenKind::Plus => self.term(cursor)?,
            TokenKind::Minus => self.term(cursor)?.wrapping_neg(),
            TokenKind::Not => !self.term(cursor)?,
            _ => {
                cursor.push_back(token.len);
                self.term(cursor)?
            }
        };

        loop {
            let token = cursor.next_token();
            let term = match token.kind {
                TokenKind::End => return Ok(sum),
                TokenKind::Plus => self.term(cursor)?,
                TokenKind::Minus => self.term(cursor)?.wrapping_neg(),
                TokenKind::Not => !self.term(cursor)?,
                _ => {
                    cursor.push_back(token.len);
                    return Ok(sum);
                }
            };
            sum = sum.wrapping_add(term);
        }
    }

    fn term(&self, cursor: &mut Cursor<'_>) -> Result<i32, Error> {
        let mut acc = self.factor(cursor)?;

        loop {
            let op = cursor.next_token();
            if !op.kind.is_int_term_op() {
                cursor.push_back(op.len);
                return Ok(acc);
            }
            let rhs = self.factor(cursor)?;
            acc = combine(&op, acc, rhs)?;
        }
    }

    fn factor(&self, cursor: &mut Cursor<'_>) -> Result<i32, Error> {
        let token = cursor.next_token();
        match token.kind {
            TokenKind::SourceByte(index) => byte(&self.source, index, &token),
            TokenKind::DestByte(index) => byte(&self.dest, index, &token),
            TokenKind::BitPos => Ok(i32::from(self.bit_pos)),
            // 0xffffffff is -1, hex literals are bit patterns
            TokenKind::Hex => token.hex_value().map(|hex| hex as i32),
            TokenKind::Decimal => token
                .lexeme
                .parse::<i32>()
                .ok()
                .context(InvalidLiteralSnafu {
                    position: token.offset,
                }),
            TokenKind::Fraction => InvalidLiteralSnafu {
                position: token.offset,
            }
            .fail(),
            TokenKind::Not => Ok(!self.factor(cursor)?),
            TokenKind::Open => {
                let inner = self.expression(cursor)?;
                cursor.close_group()?;
                Ok(inner)
            }
            _ => token.unexpected(),
        }
    }
}

fn byte(window: &ByteWindow, index: u8, token: &Token<'_>) -> Result<i32, Error> {
    window
        .get(index)
        .map(i32::from)
        .ok_or_else(|| token.malformed())
}

/// Apply one term operator.
fn combine(op: &Token<'_>, lhs: i32, rhs: i32) -> Result<i32, Error> {
    let position = op.offset;
    Ok(match op.kind {
        TokenKind::Times => lhs.wrapping_mul(rhs),
        TokenKind::Divide => {
            ensure!(rhs != 0, DivisionByZeroSnafu { position });
            lhs.wrapping_div(rhs)
        }
        TokenKind::Modulo => {
            ensure!(rhs != 0, DivisionByZeroSnafu { position });
            lhs.wrapping_rem(rhs)
        }
        TokenKind::And => lhs & rhs,
        TokenKind::Or => lhs | rhs,
        TokenKind::Xor => lhs ^ rhs,
        TokenKind::Shl => u32::try_from(rhs)
            .ok()
            .and_then(|amount| lhs.checked_shl(amount))
            .context(ShiftOutOfRangeSnafu {
                position,
                amount: rhs,
            })?,
        TokenKind::Shr => u32::try_from(rhs)
            .ok()
            .and_then(|amount| lhs.checked_shr(amount))
            .context(ShiftOutOfRangeSnafu {
                position,
                amount: rhs,
            })?,
        other => return UnknownOperatorSnafu { code: other.code() }.fail(),
    })
}
