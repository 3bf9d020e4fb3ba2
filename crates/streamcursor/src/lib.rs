//! Peekable, position-tracking cursors over blocking byte streams.
//!
//! Two cursors share one contract, [`Cursor`]:
//!
//! - [`ByteCursor`] steps through the input one raw byte at a time;
//! - [`CharCursor`] steps through it one Unicode code point at a time,
//!   decoding UTF-8 incrementally.
//!
//! Both read the stream through a small fixed-size scratch buffer, so the
//! input is never materialized as a whole, and both track line and column as
//! they consume. When a cursor is done with its part of the input,
//! [`Cursor::into_unused`] hands the rest (buffered bytes first, then the
//! stream) to whatever comes next.
//!
//! ```rust
//! use std::io::Read;
//! use streamcursor::{CharCursor, Cursor};
//!
//! let input = "Content-Length: 5\n\nhello";
//! let mut cursor = CharCursor::new(input.as_bytes());
//!
//! assert!(cursor.consume("Content-Length:"));
//! while cursor.peek() == Some(' ') {
//!     cursor.advance(1).unwrap();
//! }
//! let mut digits = String::new();
//! while let Some(ch) = cursor.peek().filter(char::is_ascii_digit) {
//!     digits.push(ch);
//!     cursor.advance(1).unwrap();
//! }
//! assert!(cursor.consume("\n\n"));
//! assert_eq!(cursor.line_number(), 3);
//!
//! let mut body = Vec::new();
//! cursor.into_unused().read_to_end(&mut body).unwrap();
//! assert_eq!(body.len(), digits.parse::<usize>().unwrap());
//! ```
//!
//! # Logging
//!
//! Refills, decode passes and terminal conditions are reported through the
//! [`log`] facade at `trace` and `debug` level. No logger is installed by
//! this crate.

mod byte_cursor;
mod char_cursor;
mod cursor;
mod error;
mod options;
mod position;
mod scratch;
mod unused;

#[cfg(test)]
mod tests;

pub use byte_cursor::ByteCursor;
pub use char_cursor::CharCursor;
pub use cursor::{Cursor, Units};
pub use error::CursorError;
pub use options::{CursorOptions, DEFAULT_SCRATCH_CAPACITY};
pub use position::Position;
pub use unused::Unused;
