use std::io::{self, Read};

use bstr::BStr;

use crate::{
    Cursor, CursorError, CursorOptions, Unused, position::LineTracker, scratch::Scratch,
};

/// A cursor whose unit is one raw byte.
///
/// Look-ahead is bounded by the scratch capacity: `peek_at(n)` and prefix
/// tests of `n` bytes fail with [`CursorError::LookaheadTooLarge`] when `n`
/// exceeds it.
///
/// ```rust
/// use streamcursor::{ByteCursor, Cursor};
///
/// let mut cursor = ByteCursor::new(&b"\xFE\xFFrest"[..]);
/// assert_eq!(cursor.peek(), Some(0xFE));
/// assert!(cursor.consume_bytes(&[0xFE, 0xFF]));
/// assert_eq!(cursor.current(), Some(b'r'));
/// assert_eq!(cursor.column(), 4);
/// ```
#[derive(Debug)]
pub struct ByteCursor<R> {
    scratch: Scratch<R>,
    tracker: LineTracker,
}

impl<R: Read> ByteCursor<R> {
    /// Creates a cursor with the default scratch capacity.
    pub fn new(stream: R) -> Self {
        Self::with_options(stream, CursorOptions::default())
    }

    /// Creates a cursor with a scratch buffer of `capacity` bytes (`0` selects
    /// the default).
    pub fn with_capacity(stream: R, capacity: usize) -> Self {
        Self::with_options(stream, CursorOptions::with_capacity(capacity))
    }

    /// Creates a cursor from explicit options.
    pub fn with_options(stream: R, options: CursorOptions) -> Self {
        Self {
            scratch: Scratch::new(stream, options.effective_capacity()),
            tracker: LineTracker::default(),
        }
    }
}

impl<R> ByteCursor<R> {
    /// Size of the scratch buffer in bytes.
    pub fn capacity(&self) -> usize {
        self.scratch.capacity()
    }

    /// Bytes already pulled from the stream but not consumed.
    pub fn buffered(&self) -> &[u8] {
        self.scratch.unconsumed()
    }

    /// Gets a reference to the underlying stream.
    pub fn get_ref(&self) -> &R {
        self.scratch.stream()
    }
}

impl<R: Read> Cursor for ByteCursor<R> {
    type Unit = u8;
    type Stream = R;

    fn try_peek_at(&mut self, n: usize) -> Result<u8, CursorError> {
        if n == 0 {
            return Err(CursorError::ZeroLookahead);
        }
        self.scratch.ensure(n)?;
        Ok(self.scratch.unconsumed()[n - 1])
    }

    fn advance(&mut self, n: usize) -> Result<(), CursorError> {
        if n == 0 {
            return Ok(());
        }
        self.scratch.ensure(n)?;
        self.tracker.record_bytes(&self.scratch.unconsumed()[..n]);
        self.scratch.consume(n);
        Ok(())
    }

    fn has_prefix_bytes(&mut self, prefix: &[u8]) -> bool {
        if prefix.is_empty() {
            return true;
        }
        self.scratch.ensure(prefix.len()).is_ok() && self.scratch.unconsumed().starts_with(prefix)
    }

    fn consume_bytes(&mut self, prefix: &[u8]) -> bool {
        self.has_prefix_bytes(prefix) && self.advance(prefix.len()).is_ok()
    }

    fn has_prefix(&mut self, text: &str) -> bool {
        self.has_prefix_bytes(text.as_bytes())
    }

    fn consume(&mut self, text: &str) -> bool {
        self.consume_bytes(text.as_bytes())
    }

    fn line(&self) -> &BStr {
        self.tracker.line()
    }

    fn line_number(&self) -> usize {
        self.tracker.line_number()
    }

    fn column(&self) -> usize {
        self.tracker.column()
    }

    fn consumed(&self) -> usize {
        self.tracker.consumed()
    }

    fn into_unused(self) -> Unused<R> {
        self.scratch.into_unused()
    }
}

impl<R: Read> Read for ByteCursor<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.scratch.read_through(buf)?;
        self.tracker.skip_raw(n);
        Ok(n)
    }
}
