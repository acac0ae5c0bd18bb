//! Error type shared by the tokenizer, both evaluators and the command merge.

use snafu::Snafu;

use crate::token::TokenKind;

/// Reasons a formula evaluation (or a command merge) can fail.
///
/// The first error detected at any nesting depth aborts the whole
/// evaluation; no partial result is returned.
#[derive(Debug, Snafu, Clone, Copy, PartialEq)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum Error {
    /// The text at `position` isn't a token of the formula language.
    #[snafu(display("Malformed token {:?} at offset {}", found, position))]
    MalformedToken { position: usize, found: char },

    /// A factor was expected, but the token can't start one in this grammar.
    #[snafu(display("Expected factor at offset {}, found {}", position, found))]
    UnexpectedToken { position: usize, found: TokenKind },

    /// A parenthesized group wasn't closed.
    #[snafu(display("Expected ')' at offset {}, found {}", position, found))]
    UnclosedGroup { position: usize, found: TokenKind },

    /// A numeric literal doesn't fit the evaluator's number type.
    #[snafu(display("Invalid literal at offset {}", position))]
    InvalidLiteral { position: usize },

    /// An operator reached a combination step it has no rule for.
    #[snafu(display("Unhandled operator token {} in integer term", code))]
    UnknownOperator { code: i32 },

    /// Integer division or remainder with a zero divisor.
    #[snafu(display("Division by zero at offset {}", position))]
    DivisionByZero { position: usize },

    /// Shift amount outside of `0..32`.
    #[snafu(display("Shift amount {} out of range at offset {}", amount, position))]
    ShiftOutOfRange { position: usize, amount: i32 },

    /// Text remains after the top-level expression.
    #[snafu(display("Unexpected input after expression at offset {}", position))]
    TrailingInput { position: usize },

    /// The merge target lies outside of the command capacity.
    #[snafu(display("Can't merge {} bytes at position {} into command", len, position))]
    MergeOutOfRange { position: usize, len: usize },
}
