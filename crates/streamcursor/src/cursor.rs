use core::fmt;
use std::io::Read;

use bstr::BStr;

use crate::{CursorError, Position, Unused};

/// The capabilities shared by [`ByteCursor`] and [`CharCursor`].
///
/// A cursor is a forward-only view over a blocking stream with bounded
/// look-ahead. `Unit` is what one step consumes: a raw byte for
/// [`ByteCursor`], a decoded `char` for [`CharCursor`].
///
/// Look-ahead positions are 1-based: `peek_at(1)` is the next unit.
///
/// Every cursor is itself a [`Read`]: reading drains the bytes the cursor has
/// buffered but not consumed, then reads straight from the stream. This
/// lets a cursor be handed to any byte-oriented consumer, including another
/// cursor.
///
/// ```rust
/// use streamcursor::{CharCursor, Cursor};
///
/// let mut cursor = CharCursor::new("let x = 1;\nlet y = 2;".as_bytes());
/// assert!(cursor.consume("let"));
/// assert_eq!(cursor.peek(), Some(' '));
/// assert_eq!(cursor.peek_at(2), Some('x'));
/// assert_eq!(cursor.column(), 4);
/// ```
///
/// [`ByteCursor`]: crate::ByteCursor
/// [`CharCursor`]: crate::CharCursor
pub trait Cursor: Read {
    /// The unit of consumption.
    type Unit: Copy + Eq + fmt::Debug;
    /// The stream the cursor reads from.
    type Stream: Read;

    /// Returns the `n`-th unit ahead without consuming anything.
    ///
    /// # Errors
    ///
    /// Fails if `n` is zero, if the stream cannot provide `n` units, if `n`
    /// units do not fit the scratch buffer, or on malformed input.
    fn try_peek_at(&mut self, n: usize) -> Result<Self::Unit, CursorError>;

    /// Returns the `n`-th unit ahead, or `None` if it cannot be produced.
    fn peek_at(&mut self, n: usize) -> Option<Self::Unit> {
        self.try_peek_at(n).ok()
    }

    /// Returns the next unit without consuming it.
    fn peek(&mut self) -> Option<Self::Unit> {
        self.peek_at(1)
    }

    /// Consumes and returns the next unit.
    fn current(&mut self) -> Option<Self::Unit> {
        let unit = self.try_peek_at(1).ok()?;
        self.advance(1).ok()?;
        Some(unit)
    }

    /// Consumes `n` units, updating line and column.
    ///
    /// Nothing is consumed if fewer than `n` units are available.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Cursor::try_peek_at`].
    fn advance(&mut self, n: usize) -> Result<(), CursorError>;

    /// Returns `true` if the unconsumed input starts with `prefix`.
    fn has_prefix_bytes(&mut self, prefix: &[u8]) -> bool;

    /// Consumes `prefix` if the unconsumed input starts with it.
    fn consume_bytes(&mut self, prefix: &[u8]) -> bool;

    /// Returns `true` if the unconsumed input starts with `text`.
    fn has_prefix(&mut self, text: &str) -> bool;

    /// Consumes `text` if the unconsumed input starts with it.
    fn consume(&mut self, text: &str) -> bool;

    /// Returns `true` once no further unit can be produced.
    fn is_done(&mut self) -> bool {
        self.try_peek_at(1).is_err()
    }

    /// What has been consumed of the current line so far.
    fn line(&self) -> &BStr;

    /// 1-based number of the current line.
    fn line_number(&self) -> usize;

    /// 1-based column of the next unit.
    fn column(&self) -> usize;

    /// Number of raw bytes consumed so far, raw reads included.
    fn consumed(&self) -> usize;

    /// Line, column and byte offset in one value.
    fn position(&self) -> Position {
        Position {
            line: self.line_number(),
            column: self.column(),
            offset: self.consumed(),
        }
    }

    /// Iterates over the remaining units, consuming them.
    fn units(&mut self) -> Units<'_, Self>
    where
        Self: Sized,
    {
        Units { cursor: self }
    }

    /// Retires the cursor and returns everything it has not consumed.
    fn into_unused(self) -> Unused<Self::Stream>
    where
        Self: Sized;
}

/// Iterator returned by [`Cursor::units`].
#[derive(Debug)]
pub struct Units<'a, C> {
    cursor: &'a mut C,
}

impl<C: Cursor> Iterator for Units<'_, C> {
    type Item = C::Unit;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.current()
    }
}
