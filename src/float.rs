//! Float formulas, used to convert received bytes into a physical value.
//!
//! ```text
//! expression := [+|-] term { (+|-) term }
//! term       := factor { (*|/) factor }
//! factor     := number | hex | BYTEn | VALUE | ( expression )
//! ```
//!
//! Division by zero is not an error, it yields infinity or NaN like any
//! other `f32` division.

use snafu::OptionExt;

use crate::buffer::ByteWindow;
use crate::cursor::Cursor;
use crate::error::{Error, InvalidLiteralSnafu};
use crate::token::TokenKind;

/// Evaluate the float expression at `cursor`.
///
/// `source` is copied into a [`ByteWindow`] for the `BYTEn` references, and
/// `value` is substituted for `VALUE`. On success the cursor is left right
/// after the expression, any text that doesn't continue it is not consumed.
/// # Errors
/// Returns the first error found; the cursor position is unspecified then.
pub fn eval_float(cursor: &mut Cursor<'_>, source: &[u8], value: f32) -> Result<f32, Error> {
    log::trace!("eval_float({:?}, value={})", cursor.remaining(), value);
    let eval = FloatEval {
        source: ByteWindow::new(source),
        value,
    };
    eval.expression(cursor).map_err(|err| {
        log::debug!("float formula failed: {}", err);
        err
    })
}

struct FloatEval {
    source: ByteWindow,
    value: f32,
}

impl FloatEval {
    fn expression(&self, cursor: &mut Cursor<'_>) -> Result<f32, Error> {
        let token = cursor.next_token();
        let sign = match token.kind {
            TokenKind::Plus => 1.0,
            TokenKind::Minus => -1.0,
            _ => {
                cursor.push_back(token.len);
                1.0
            }
        };
        let mut sum = self.term(cursor)? * sign;

        loop {
            let token = cursor.next_token();
            let sign = match token.kind {
                TokenKind::End => return Ok(sum),
                TokenKind::Plus => 1.0,
                TokenKind::Minus => -1.0,
                _ => {
                    cursor.push_back(token.len);
                    return Ok(sum);
                }
            };
            sum += self.term(cursor)? * sign;
        }
    }

    fn term(&self, cursor: &mut Cursor<'_>) -> Result<f32, Error> {
        let mut product = self.factor(cursor)?;

        loop {
            let token = cursor.next_token();
            match token.kind {
                TokenKind::Times => product *= self.factor(cursor)?,
                TokenKind::Divide => product /= self.factor(cursor)?,
                _ => {
                    cursor.push_back(token.len);
                    return Ok(product);
                }
            }
        }
    }

    fn factor(&self, cursor: &mut Cursor<'_>) -> Result<f32, Error> {
        let token = cursor.next_token();
        match token.kind {
            TokenKind::SourceByte(index) => self
                .source
                .get(index)
                .map(f32::from)
                .ok_or_else(|| token.malformed()),
            TokenKind::Value => Ok(self.value),
            TokenKind::Hex => token.hex_value().map(|hex| hex as f32),
            TokenKind::Decimal | TokenKind::Fraction => token
                .lexeme
                .parse::<f32>()
                .ok()
                .context(InvalidLiteralSnafu {
                    position: token.offset,
                }),
            TokenKind::Open => {
                let inner = self.expression(cursor)?;
                cursor.close_group()?;
                Ok(inner)
            }
            _ => token.unexpected(),
        }
    }
}
