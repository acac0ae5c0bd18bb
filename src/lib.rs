//! Evaluator for the small conversion formulas found in device definitions.
//!
//! A formula maps raw protocol bytes to a value (float formulas, e.g.
//! `(B1*256+B0)/10`), or composes the bytes of a command from a value
//! (integer formulas, e.g. `P0 & ~(1 << BP) | (B0 << BP)`).
//!
//! The crate does no I/O: the caller supplies the received bytes, the
//! command being composed and the formula text, and moves bytes to and
//! from the device itself.
//!
//! ## Example
//! ```
//! use byte_formula::{eval_float, Cursor};
//! let mut cursor = Cursor::new("BYTE0 + BYTE1 ; unit=C");
//! assert_eq!(eval_float(&mut cursor, &[10, 20], 0.0), Ok(30.0));
//! assert_eq!(cursor.remaining(), " ; unit=C");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod buffer;
mod cursor;
pub mod error;
mod float;
mod formula;
mod int;
mod lexer;
pub mod token;

pub use buffer::{ByteWindow, CommandBuffer, WINDOW_LEN};
pub use cursor::Cursor;
pub use error::Error;
pub use float::eval_float;
pub use formula::Formula;
pub use int::eval_int;
pub use token::{Token, TokenKind};
