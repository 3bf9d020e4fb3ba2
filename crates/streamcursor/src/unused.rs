use std::io::{self, Read};

/// Everything a retired cursor did not consume: the bytes it had already
/// pulled into its scratch buffer, followed by the untouched rest of the
/// stream.
///
/// Obtained from [`Cursor::into_unused`]. Use it to hand the input over to a
/// different consumer without losing data.
///
/// ```rust
/// use std::io::Read;
/// use streamcursor::{ByteCursor, Cursor};
///
/// let mut cursor = ByteCursor::new(&b"MAGIC\x00payload"[..]);
/// assert!(cursor.consume_bytes(b"MAGIC\x00"));
///
/// let mut payload = String::new();
/// cursor.into_unused().read_to_string(&mut payload).unwrap();
/// assert_eq!(payload, "payload");
/// ```
///
/// [`Cursor::into_unused`]: crate::Cursor::into_unused
#[derive(Debug)]
pub struct Unused<R> {
    pending: Vec<u8>,
    pos: usize,
    stream: R,
}

impl<R> Unused<R> {
    pub(crate) fn new(pending: Vec<u8>, stream: R) -> Self {
        Self {
            pending,
            pos: 0,
            stream,
        }
    }

    /// Captured bytes that have not been read yet.
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        &self.pending[self.pos..]
    }

    /// Gets a reference to the underlying stream.
    pub fn get_ref(&self) -> &R {
        &self.stream
    }

    /// Splits into the captured bytes not read yet and the stream.
    pub fn into_parts(mut self) -> (Vec<u8>, R) {
        self.pending.drain(..self.pos);
        (self.pending, self.stream)
    }
}

impl<R: Read> Read for Unused<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos < self.pending.len() {
            let n = (&self.pending[self.pos..]).read(buf)?;
            self.pos += n;
            if self.pos == self.pending.len() {
                self.pending = Vec::new();
                self.pos = 0;
            }
            return Ok(n);
        }
        self.stream.read(buf)
    }
}
