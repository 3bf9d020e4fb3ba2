/// Scratch buffer size used when none is configured: room for ten worst-case
/// (4-byte) UTF-8 code points.
pub const DEFAULT_SCRATCH_CAPACITY: usize = 40;

/// Construction-time configuration shared by [`ByteCursor`] and
/// [`CharCursor`].
///
/// # Examples
///
/// ```rust
/// use streamcursor::{ByteCursor, CursorOptions};
///
/// let options = CursorOptions {
///     scratch_capacity: 64,
/// };
/// let cursor = ByteCursor::with_options(&b"GET / HTTP/1.1"[..], options);
/// assert_eq!(cursor.capacity(), 64);
/// ```
///
/// [`ByteCursor`]: crate::ByteCursor
/// [`CharCursor`]: crate::CharCursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CursorOptions {
    /// Size in bytes of the scratch buffer the cursor reads the stream into.
    ///
    /// This bounds the look-ahead: a byte cursor can peek at most this many
    /// bytes ahead, and a code-point cursor at most as many code points as
    /// fit in this many bytes. A value of `0` selects the default.
    ///
    /// # Default
    ///
    /// [`DEFAULT_SCRATCH_CAPACITY`] (40 bytes)
    pub scratch_capacity: usize,
}

impl Default for CursorOptions {
    fn default() -> Self {
        Self {
            scratch_capacity: DEFAULT_SCRATCH_CAPACITY,
        }
    }
}

impl CursorOptions {
    /// Options with the given scratch capacity.
    #[must_use]
    pub fn with_capacity(scratch_capacity: usize) -> Self {
        Self { scratch_capacity }
    }

    pub(crate) fn effective_capacity(&self) -> usize {
        if self.scratch_capacity == 0 {
            DEFAULT_SCRATCH_CAPACITY
        } else {
            self.scratch_capacity
        }
    }
}
