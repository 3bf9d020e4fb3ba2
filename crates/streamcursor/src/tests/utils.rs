use std::io::{self, ErrorKind, Read};

/// Serves `data` at most `chunk` bytes per read and counts the calls.
#[derive(Debug)]
pub(crate) struct Chunked<'a> {
    data: &'a [u8],
    chunk: usize,
    reads: usize,
}

impl<'a> Chunked<'a> {
    pub(crate) fn new(data: &'a [u8], chunk: usize) -> Self {
        assert!(chunk > 0);
        Self {
            data,
            chunk,
            reads: 0,
        }
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads
    }
}

impl Read for Chunked<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        let n = self.chunk.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Serves `data` in read sizes taken in turn from `sizes` (each `1 + s % 16`).
/// Used by the properties to exercise arbitrary chunkings.
#[derive(Debug)]
pub(crate) struct Scripted<'a> {
    data: &'a [u8],
    sizes: Vec<usize>,
    turn: usize,
}

impl<'a> Scripted<'a> {
    pub(crate) fn new(data: &'a [u8], sizes: Vec<usize>) -> Self {
        Self {
            data,
            sizes,
            turn: 0,
        }
    }
}

impl Read for Scripted<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let size = if self.sizes.is_empty() {
            buf.len()
        } else {
            1 + self.sizes[self.turn % self.sizes.len()] % 16
        };
        self.turn += 1;
        let n = size.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Serves `data`, then fails every read with `kind`.
#[derive(Debug)]
pub(crate) struct Failing<'a> {
    data: &'a [u8],
    kind: ErrorKind,
}

impl<'a> Failing<'a> {
    pub(crate) fn new(data: &'a [u8], kind: ErrorKind) -> Self {
        Self { data, kind }
    }
}

impl Read for Failing<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(self.kind.into());
        }
        (&mut self.data).read(buf)
    }
}

/// Alternates between `Interrupted` and serving a single byte.
#[derive(Debug)]
pub(crate) struct Interrupting<'a> {
    data: &'a [u8],
    interrupt: bool,
}

impl<'a> Interrupting<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            interrupt: true,
        }
    }
}

impl Read for Interrupting<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if !self.interrupt {
            return Err(ErrorKind::Interrupted.into());
        }
        let n = 1.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Number of property cases to run.
pub(crate) fn property_tests() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

/// Installs a test logger so `RUST_LOG=trace` shows refills and decode
/// passes.
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
