use core::fmt;

use bstr::{BStr, ByteSlice};

/// Where a cursor stands in its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in the cursor's units.
    pub column: usize,
    /// Number of raw bytes consumed from the start of the input.
    pub offset: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Line/column bookkeeping shared by both cursors.
///
/// Only `\n` breaks a line. The current line holds the units consumed since
/// the last break, the break itself excluded, so `column == 1 + units in the
/// current line` always holds.
#[derive(Debug, Clone)]
pub(crate) struct LineTracker {
    line_number: usize,
    column: usize,
    line: Vec<u8>,
    consumed: usize,
}

impl Default for LineTracker {
    fn default() -> Self {
        Self {
            line_number: 1,
            column: 1,
            line: Vec::new(),
            consumed: 0,
        }
    }
}

impl LineTracker {
    /// Records a span of bytes consumed as bytes: every byte is one column.
    pub(crate) fn record_bytes(&mut self, span: &[u8]) {
        self.consumed += span.len();
        match span.rfind_byte(b'\n') {
            Some(last) => {
                self.line_number += span.iter().filter(|&&b| b == b'\n').count();
                self.column = span.len() - last;
                self.line.clear();
                self.line.extend_from_slice(&span[last + 1..]);
            }
            None => {
                self.column += span.len();
                self.line.extend_from_slice(span);
            }
        }
    }

    /// Records one consumed code point that took `width` bytes.
    pub(crate) fn record_char(&mut self, ch: char, width: usize) {
        self.consumed += width;
        if ch == '\n' {
            self.line_number += 1;
            self.column = 1;
            self.line.clear();
        } else {
            self.column += 1;
            let mut tmp = [0u8; 4];
            self.line
                .extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
        }
    }

    /// Records bytes that left the cursor without position tracking (raw
    /// reads).
    pub(crate) fn skip_raw(&mut self, n: usize) {
        self.consumed += n;
    }

    #[inline]
    pub(crate) fn line(&self) -> &BStr {
        self.line.as_bstr()
    }

    #[inline]
    pub(crate) fn line_number(&self) -> usize {
        self.line_number
    }

    #[inline]
    pub(crate) fn column(&self) -> usize {
        self.column
    }

    #[inline]
    pub(crate) fn consumed(&self) -> usize {
        self.consumed
    }
}
