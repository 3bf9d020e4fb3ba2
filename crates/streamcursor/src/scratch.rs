//! Scratch buffer: the fixed-capacity staging area between a cursor and its
//! stream.
//!
//! Both cursors sit on top of a [`Scratch`]. It owns the stream and a byte
//! buffer of fixed capacity; `pos..len` is the window of bytes that were
//! pulled from the stream but not yet consumed.
//!
//! Refill protocol ([`Scratch::ensure`]):
//! 1. A released buffer (stream ended, nothing left) reports `Exhausted`.
//! 2. A request larger than the capacity is a configuration error and fails
//!    immediately with `LookaheadTooLarge`.
//! 3. Enough bytes in the window: nothing to do.
//! 4. Otherwise the window is compacted to the front of the buffer and the
//!    stream is read into the free tail until the request is satisfied or the
//!    stream reports end of data.
//!
//! Invariants
//! - `pos <= len <= capacity`; `buf.len() == capacity` until released.
//! - The stream is never read again once it reported end of data or failed.
//! - Bytes in the window are never dropped except by consumption; running
//!   out of stream does not discard a partial window.

use std::io::{self, Read};

use log::{debug, trace};

use crate::{CursorError, Unused};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Open,
    Ended,
    Failed(io::ErrorKind),
    /// Ended and drained; the buffer storage has been dropped.
    Released,
}

#[derive(Debug)]
pub(crate) struct Scratch<R> {
    buf: Vec<u8>,
    capacity: usize,
    len: usize,
    pos: usize,
    stream: R,
    state: StreamState,
}

impl<R: Read> Scratch<R> {
    pub(crate) fn new(stream: R, capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            capacity,
            len: 0,
            pos: 0,
            stream,
            state: StreamState::Open,
        }
    }

    /// Guarantees at least `n` unconsumed bytes in the window.
    pub(crate) fn ensure(&mut self, n: usize) -> Result<(), CursorError> {
        if self.state == StreamState::Released {
            return Err(CursorError::Exhausted);
        }
        if n > self.capacity {
            return Err(CursorError::LookaheadTooLarge {
                requested: n,
                capacity: self.capacity,
            });
        }
        if self.available() >= n {
            return Ok(());
        }

        self.compact();
        while self.len < n && self.state == StreamState::Open {
            // `len < n <= capacity`, so the slice is never empty and `Ok(0)`
            // really is end of data.
            match self.stream.read(&mut self.buf[self.len..]) {
                Ok(0) => {
                    debug!("stream ended with {} bytes buffered", self.len);
                    self.state = StreamState::Ended;
                }
                Ok(read) => {
                    trace!("refill: {read} bytes after {} retained", self.len);
                    self.len += read;
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    debug!("stream failed: {err}");
                    self.state = StreamState::Failed(err.kind());
                }
            }
        }

        if self.len >= n {
            Ok(())
        } else {
            Err(self.shortfall(n))
        }
    }

    fn shortfall(&mut self, requested: usize) -> CursorError {
        match self.state {
            StreamState::Failed(kind) => CursorError::Io(kind),
            _ if self.available() == 0 => {
                self.release();
                CursorError::Exhausted
            }
            _ => CursorError::Insufficient {
                requested,
                available: self.available(),
            },
        }
    }

    /// Moves the unconsumed window to the front of the buffer.
    fn compact(&mut self) {
        if self.pos == 0 {
            return;
        }
        self.buf.copy_within(self.pos..self.len, 0);
        self.len -= self.pos;
        self.pos = 0;
    }

    fn release(&mut self) {
        debug!("scratch buffer released");
        self.buf = Vec::new();
        self.len = 0;
        self.pos = 0;
        self.state = StreamState::Released;
    }

    /// Copies buffered bytes into `out`, then reads the stream directly into
    /// whatever room is left. Does not go through [`Scratch::ensure`].
    pub(crate) fn read_through(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let buffered = self.available().min(out.len());
        out[..buffered].copy_from_slice(&self.buf[self.pos..self.pos + buffered]);
        self.pos += buffered;
        if buffered == out.len() {
            return Ok(buffered);
        }

        match self.state {
            StreamState::Open => {}
            StreamState::Failed(kind) if buffered == 0 => return Err(kind.into()),
            _ => return Ok(buffered),
        }

        match self.stream.read(&mut out[buffered..]) {
            Ok(read) => {
                if read == 0 {
                    self.state = StreamState::Ended;
                }
                Ok(buffered + read)
            }
            Err(err) => {
                if err.kind() != io::ErrorKind::Interrupted {
                    self.state = StreamState::Failed(err.kind());
                }
                if buffered > 0 { Ok(buffered) } else { Err(err) }
            }
        }
    }
}

impl<R> Scratch<R> {
    /// Bytes pulled from the stream but not consumed yet.
    #[inline]
    pub(crate) fn unconsumed(&self) -> &[u8] {
        &self.buf[self.pos..self.len]
    }

    #[inline]
    pub(crate) fn available(&self) -> usize {
        self.len - self.pos
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Marks `n` bytes of the window as consumed.
    #[inline]
    pub(crate) fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.available(), "consumed past the window");
        self.pos += n;
    }

    pub(crate) fn stream(&self) -> &R {
        &self.stream
    }

    /// Hands the window and the stream over to a continuation reader.
    pub(crate) fn into_unused(self) -> Unused<R> {
        let Scratch {
            mut buf,
            len,
            pos,
            stream,
            ..
        } = self;
        buf.truncate(len);
        buf.drain(..pos);
        Unused::new(buf, stream)
    }
}
