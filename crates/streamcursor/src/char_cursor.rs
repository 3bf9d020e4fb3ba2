//! Code-point cursor: UTF-8 decoding over the scratch buffer.
//!
//! Decoding never takes bytes out of the scratch buffer. The read-ahead ring
//! caches the code points decoded from the front of the unconsumed window;
//! `decoded` is the number of window bytes the ring covers. Consumption pops
//! units from the ring and only then moves the scratch position by their
//! width, so the window always holds every byte that was not consumed, ring
//! or not.
//!
//! ```text
//!   scratch:  | consumed | decoded (ring) | undecoded tail | free |
//!                        ^pos                              ^len
//! ```
//!
//! Invariants
//! - `decoded == sum of ring widths <= scratch.available()`.
//! - Ring units are in stream order; popped strictly from the front.
//! - An invalid sequence stops decoding at that sequence; it is reported,
//!   never skipped.

use std::{
    collections::VecDeque,
    io::{self, Read},
};

use bstr::{BStr, ByteSlice};
use log::{debug, trace};

use crate::{
    Cursor, CursorError, CursorOptions, Unused, position::LineTracker, scratch::Scratch,
};

/// One decoded code point and the number of bytes it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Decoded {
    ch: char,
    width: usize,
}

/// A cursor whose unit is one Unicode code point decoded from UTF-8.
///
/// Look-ahead is bounded by the scratch capacity in bytes: with the default
/// 40 bytes at least ten code points can always be peeked.
///
/// ```rust
/// use streamcursor::{CharCursor, Cursor};
///
/// let mut cursor = CharCursor::new("こんにちは, world".as_bytes());
/// assert_eq!(cursor.peek_at(2), Some('ん'));
/// assert!(cursor.consume("こんにちは"));
/// assert_eq!(cursor.column(), 6);
/// assert_eq!(cursor.consumed(), 15);
/// ```
#[derive(Debug)]
pub struct CharCursor<R> {
    scratch: Scratch<R>,
    ahead: VecDeque<Decoded>,
    decoded: usize,
    tracker: LineTracker,
}

impl<R: Read> CharCursor<R> {
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
        let capacity = options.effective_capacity();
        Self {
            scratch: Scratch::new(stream, capacity),
            ahead: VecDeque::with_capacity(capacity),
            decoded: 0,
            tracker: LineTracker::default(),
        }
    }

    /// Decodes complete code points from the undecoded tail of the window
    /// into the ring.
    ///
    /// An incomplete trailing sequence is left for the next refill; an
    /// invalid one stops decoding and is reported.
    fn decode_more(&mut self) -> Result<(), CursorError> {
        let pending = &self.scratch.unconsumed()[self.decoded..];
        if pending.is_empty() {
            return Ok(());
        }
        let (valid, invalid) = match core::str::from_utf8(pending) {
            Ok(_) => (pending.len(), false),
            Err(err) => (err.valid_up_to(), err.error_len().is_some()),
        };

        let before = self.ahead.len();
        for (start, end, ch) in pending[..valid].char_indices() {
            self.ahead.push_back(Decoded {
                ch,
                width: end - start,
            });
        }
        self.decoded += valid;
        trace!(
            "decoded {} code points from {valid} bytes",
            self.ahead.len() - before
        );

        if invalid {
            let offset = self.tracker.consumed() + self.decoded;
            debug!("invalid UTF-8 at byte {offset}");
            return Err(CursorError::InvalidUtf8 { offset });
        }
        Ok(())
    }

    /// Fills the ring until it holds at least `n` code points.
    ///
    /// Every code point takes at least one byte, so more than `capacity`
    /// code points can never fit and are refused before touching the stream.
    fn ensure_chars(&mut self, n: usize) -> Result<(), CursorError> {
        if n > self.scratch.capacity() {
            return Err(CursorError::LookaheadTooLarge {
                requested: n,
                capacity: self.scratch.capacity(),
            });
        }
        loop {
            if self.ahead.len() >= n {
                return Ok(());
            }
            let decoded = self.decode_more();
            if self.ahead.len() >= n {
                return Ok(());
            }
            decoded?;

            // Ask for one byte more than the window holds, so an incomplete
            // trailing sequence gets a chance to complete.
            let want = self.scratch.available() + 1;
            if want > self.scratch.capacity() {
                if self.ahead.is_empty() {
                    debug!("scratch buffer full of an incomplete sequence");
                    return Err(CursorError::Stalled);
                }
                return Err(CursorError::LookaheadTooLarge {
                    requested: n,
                    capacity: self.scratch.capacity(),
                });
            }

            if let Err(err) = self.scratch.ensure(want) {
                // The stream ended or failed; decode what did arrive.
                let decoded = self.decode_more();
                if self.ahead.len() >= n {
                    return Ok(());
                }
                decoded?;
                return Err(self.shortfall(n, err));
            }
        }
    }

    fn shortfall(&self, requested: usize, err: CursorError) -> CursorError {
        if !err.is_end_of_data() {
            return err;
        }
        if self.scratch.available() > self.decoded {
            CursorError::TruncatedUtf8 {
                offset: self.tracker.consumed() + self.decoded,
            }
        } else if self.ahead.is_empty() {
            CursorError::Exhausted
        } else {
            CursorError::Insufficient {
                requested,
                available: self.ahead.len(),
            }
        }
    }

    /// Drops the ring; it is rebuilt from the scratch position on demand.
    fn invalidate(&mut self) {
        self.ahead.clear();
        self.decoded = 0;
    }
}

impl<R> CharCursor<R> {
    /// Size of the scratch buffer in bytes.
    pub fn capacity(&self) -> usize {
        self.scratch.capacity()
    }

    /// Bytes already pulled from the stream but not consumed.
    pub fn buffered(&self) -> &[u8] {
        self.scratch.unconsumed()
    }

    /// Number of code points decoded ahead of the cursor.
    pub fn lookahead(&self) -> usize {
        self.ahead.len()
    }

    /// Gets a reference to the underlying stream.
    pub fn get_ref(&self) -> &R {
        self.scratch.stream()
    }
}

impl<R: Read> Cursor for CharCursor<R> {
    type Unit = char;
    type Stream = R;

    fn try_peek_at(&mut self, n: usize) -> Result<char, CursorError> {
        if n == 0 {
            return Err(CursorError::ZeroLookahead);
        }
        self.ensure_chars(n)?;
        Ok(self.ahead[n - 1].ch)
    }

    fn advance(&mut self, n: usize) -> Result<(), CursorError> {
        if n == 0 {
            return Ok(());
        }
        self.ensure_chars(n)?;

        let mut width = 0;
        for unit in self.ahead.drain(..n) {
            self.tracker.record_char(unit.ch, unit.width);
            width += unit.width;
        }
        self.decoded -= width;
        self.scratch.consume(width);
        Ok(())
    }

    fn has_prefix_bytes(&mut self, prefix: &[u8]) -> bool {
        if prefix.is_empty() {
            return true;
        }
        self.scratch.ensure(prefix.len()).is_ok() && self.scratch.unconsumed().starts_with(prefix)
    }

    /// Consumes `prefix` if the unconsumed input starts with it.
    ///
    /// A UTF-8 prefix is consumed as code points. Any other prefix is skipped
    /// as raw bytes (each byte counts as one column) and decoding restarts
    /// right after it.
    fn consume_bytes(&mut self, prefix: &[u8]) -> bool {
        if let Ok(text) = core::str::from_utf8(prefix) {
            return self.consume(text);
        }
        if !self.has_prefix_bytes(prefix) {
            return false;
        }
        self.tracker.record_bytes(prefix);
        self.scratch.consume(prefix.len());
        self.invalidate();
        true
    }

    fn has_prefix(&mut self, text: &str) -> bool {
        let count = text.chars().count();
        if count == 0 {
            return true;
        }
        self.ensure_chars(count).is_ok()
            && self.ahead.iter().zip(text.chars()).all(|(unit, ch)| unit.ch == ch)
    }

    fn consume(&mut self, text: &str) -> bool {
        self.has_prefix(text) && self.advance(text.chars().count()).is_ok()
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

impl<R: Read> Read for CharCursor<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // Raw reads move the scratch position underneath the ring.
        self.invalidate();
        let n = self.scratch.read_through(buf)?;
        self.tracker.skip_raw(n);
        Ok(n)
    }
}
