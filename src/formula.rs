use core::fmt;

use snafu::ensure;

use crate::buffer::CommandBuffer;
use crate::cursor::Cursor;
use crate::error::{Error, TrailingInputSnafu};
use crate::float::eval_float;
use crate::int::eval_int;
use crate::token::TokenKind;

/// A complete formula from a device definition.
///
/// Unlike [`eval_float`] and [`eval_int`], which stop at the first token
/// that can't continue the expression, a `Formula` must be consumed entirely.
///
/// ## Example
/// ```
/// use byte_formula::Formula;
/// let temperature = Formula::new("(B1*256+B0)/10");
/// assert_eq!(temperature.eval_float(&[0xe1, 0x00], 0.0), Ok(22.5));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Formula<'a>(&'a str);

impl<'a> Formula<'a> {
    pub const fn new(text: &'a str) -> Self {
        Self(text)
    }

    pub const fn as_str(&self) -> &'a str {
        self.0
    }

    /// Evaluate as a float formula, see [`eval_float`].
    /// # Errors
    /// Any evaluation error, or [`Error::TrailingInput`] if text is left over.
    pub fn eval_float(&self, source: &[u8], value: f32) -> Result<f32, Error> {
        let mut cursor = Cursor::new(self.0);
        let result = eval_float(&mut cursor, source, value)?;
        finish(&mut cursor)?;
        Ok(result)
    }

    /// Evaluate as an integer formula, see [`eval_int`].
    /// # Errors
    /// Any evaluation error, or [`Error::TrailingInput`] if text is left over.
    pub fn eval_int(&self, source: &[u8], bit_pos: u8, dest: &[u8]) -> Result<i32, Error> {
        let mut cursor = Cursor::new(self.0);
        let result = eval_int(&mut cursor, source, bit_pos, dest)?;
        finish(&mut cursor)?;
        Ok(result)
    }

    /// Evaluate as an integer formula against the current contents of
    /// `command`, then merge the result into `command` at `position`
    /// (see [`CommandBuffer::merge()`]).
    ///
    /// Returns the merged value. On error `command` is left unchanged.
    pub fn compose(
        &self,
        source: &[u8],
        bit_pos: u8,
        command: &mut CommandBuffer,
        position: usize,
        len: usize,
    ) -> Result<i32, Error> {
        let dest = command.window();
        let value = self.eval_int(source, bit_pos, dest.as_bytes())?;
        command.merge(value, position, len)?;
        Ok(value)
    }
}

impl fmt::Display for Formula<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

fn finish(cursor: &mut Cursor<'_>) -> Result<(), Error> {
    let token = cursor.next_token();
    ensure!(
        token.kind == TokenKind::End,
        TrailingInputSnafu {
            position: token.offset
        }
    );
    Ok(())
}
