#![no_main]
use std::io::{self, Read};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use streamcursor::{ByteCursor, CharCursor, Cursor};

#[derive(Debug, Arbitrary)]
struct Input {
    /// Scratch capacity; `0` selects the default.
    capacity: u8,
    /// Read sizes handed out by the stream, cycled.
    chunks: Vec<u8>,
    /// Cursor operations applied before retiring the cursor.
    ops: Vec<Op>,
    data: Vec<u8>,
}

#[derive(Debug, Arbitrary)]
enum Op {
    Peek(u8),
    Advance(u8),
    Consume(u8),
    Read(u8),
}

/// Stream that cycles through the given read sizes.
struct Scripted<'a> {
    data: &'a [u8],
    sizes: &'a [u8],
    next: usize,
}

impl Read for Scripted<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let size = match self.sizes {
            [] => buf.len(),
            sizes => 1 + usize::from(sizes[self.next % sizes.len()]) % 32,
        };
        self.next += 1;
        let n = size.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Applies `ops` and returns the bytes the cursor gave up along the way:
/// consumed units re-encoded, plus raw reads.
fn drive<C: Cursor>(cursor: &mut C, ops: &[Op], encode: impl Fn(C::Unit, &mut Vec<u8>)) -> Vec<u8> {
    let mut taken = Vec::new();
    for op in ops {
        match *op {
            Op::Peek(n) => {
                let before = cursor.position();
                let first = cursor.peek_at(usize::from(n));
                assert_eq!(first, cursor.peek_at(usize::from(n)));
                assert_eq!(before, cursor.position());
            }
            Op::Advance(n) => {
                let before = cursor.position();
                let mut units = Vec::new();
                for i in 1..=usize::from(n) {
                    match cursor.peek_at(i) {
                        Some(unit) => units.push(unit),
                        None => break,
                    }
                }
                if cursor.advance(usize::from(n)).is_ok() {
                    assert_eq!(units.len(), usize::from(n));
                    for unit in units {
                        encode(unit, &mut taken);
                    }
                } else {
                    assert_eq!(before, cursor.position());
                }
            }
            Op::Consume(n) => {
                if let Some(unit) = cursor.peek() {
                    let mut probe = Vec::new();
                    encode(unit, &mut probe);
                    if n % 2 == 1 {
                        probe.push(n);
                    }
                    if cursor.consume_bytes(&probe) {
                        taken.extend_from_slice(&probe);
                    }
                }
            }
            Op::Read(n) => {
                let mut buf = vec![0; usize::from(n)];
                if let Ok(read) = cursor.read(&mut buf) {
                    taken.extend_from_slice(&buf[..read]);
                }
            }
        }
        assert_eq!(cursor.consumed(), taken.len());
    }
    taken
}

fuzz_target!(|input: Input| {
    let capacity = usize::from(input.capacity);
    let stream = || Scripted {
        data: &input.data,
        sizes: &input.chunks,
        next: 0,
    };

    let mut bytes = ByteCursor::with_capacity(stream(), capacity);
    let mut whole = drive(&mut bytes, &input.ops, |b, out| out.push(b));
    bytes
        .into_unused()
        .read_to_end(&mut whole)
        .expect("scripted stream never fails");
    assert_eq!(whole, input.data);

    let mut chars = CharCursor::with_capacity(stream(), capacity);
    let mut whole = drive(&mut chars, &input.ops, |c, out| {
        out.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes());
    });
    chars
        .into_unused()
        .read_to_end(&mut whole)
        .expect("scripted stream never fails");
    assert_eq!(whole, input.data);
});
