use std::io;

use thiserror::Error;

/// Why a cursor could not serve a request.
///
/// None of these are fatal: the cursor stays usable and keeps reporting the
/// same condition for the same request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// Look-ahead positions are 1-based; position 0 does not exist.
    #[error("look-ahead positions start at 1")]
    ZeroLookahead,
    /// More look-ahead was requested than the scratch buffer can ever hold.
    #[error("look-ahead of {requested} exceeds the scratch buffer capacity of {capacity} bytes")]
    LookaheadTooLarge {
        /// Units requested by the caller.
        requested: usize,
        /// Capacity of the scratch buffer in bytes.
        capacity: usize,
    },
    /// The stream ended with fewer units available than requested.
    #[error("end of stream: requested {requested} units but only {available} remain")]
    Insufficient {
        /// Units requested by the caller.
        requested: usize,
        /// Units still available before the end of the stream.
        available: usize,
    },
    /// The stream ended and nothing is left to consume.
    #[error("end of stream")]
    Exhausted,
    /// The input holds a byte sequence that is not UTF-8.
    #[error("invalid UTF-8 sequence at byte {offset}")]
    InvalidUtf8 {
        /// Absolute byte offset of the sequence in the input.
        offset: usize,
    },
    /// The stream ended in the middle of a multi-byte sequence.
    #[error("truncated UTF-8 sequence at byte {offset}")]
    TruncatedUtf8 {
        /// Absolute byte offset of the sequence in the input.
        offset: usize,
    },
    /// The scratch buffer is full without holding a single complete code
    /// point, so no amount of reading can make progress.
    #[error("scratch buffer stalled without a complete code point")]
    Stalled,
    /// The underlying stream failed.
    #[error("stream error: {0}")]
    Io(io::ErrorKind),
}

impl CursorError {
    /// Returns `true` if the request failed only because the stream ran out.
    #[must_use]
    pub fn is_end_of_data(&self) -> bool {
        matches!(
            self,
            CursorError::Exhausted | CursorError::Insufficient { .. }
        )
    }

    /// Returns `true` if the request failed on malformed UTF-8.
    #[must_use]
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            CursorError::InvalidUtf8 { .. } | CursorError::TruncatedUtf8 { .. }
        )
    }
}

impl From<io::Error> for CursorError {
    fn from(err: io::Error) -> Self {
        CursorError::Io(err.kind())
    }
}
