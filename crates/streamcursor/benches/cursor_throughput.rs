//! Benchmark – `streamcursor::{ByteCursor, CharCursor}`
#![allow(missing_docs)]

use std::{
    hint::black_box,
    io::{self, Read},
    time::Duration,
};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use streamcursor::{ByteCursor, CharCursor, Cursor};

/// Deterministic mixed-script text of exactly `target_len` bytes, broken into
/// lines so that line tracking does real work.
fn make_text_payload(target_len: usize) -> String {
    const LINE: &str = "hello, 日本! これは ASCIIと日本語が入り交じった文章です 🎉\n";
    let mut s = String::with_capacity(target_len + LINE.len());
    while s.len() + LINE.len() <= target_len {
        s.push_str(LINE);
    }
    s.extend(std::iter::repeat_n('a', target_len - s.len()));
    debug_assert_eq!(s.len(), target_len);
    s
}

/// Hands out the payload `chunk` bytes at a time, the way a socket would.
struct Chunks<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl Read for Chunks<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn bench_units(c: &mut Criterion) {
    let payload = make_text_payload(64 * 1024);
    let mut group = c.benchmark_group("units");
    group.throughput(Throughput::Bytes(payload.len() as u64));

    for &capacity in &[8usize, 40, 4096] {
        for &chunk in &[1usize, 64, usize::MAX] {
            let id = format!("cap{capacity}/chunk{chunk}");
            group.bench_with_input(BenchmarkId::new("byte", &id), &chunk, |b, &chunk| {
                b.iter(|| {
                    let stream = Chunks {
                        data: black_box(payload.as_bytes()),
                        chunk,
                    };
                    let mut cursor = ByteCursor::with_capacity(stream, capacity);
                    black_box(cursor.units().count());
                });
            });
            group.bench_with_input(BenchmarkId::new("char", &id), &chunk, |b, &chunk| {
                b.iter(|| {
                    let stream = Chunks {
                        data: black_box(payload.as_bytes()),
                        chunk,
                    };
                    let mut cursor = CharCursor::with_capacity(stream, capacity);
                    black_box(cursor.units().count());
                });
            });
        }
    }
    group.finish();
}

/// Tokenizer-style access: look ahead a few code points, then consume a word.
fn bench_prefix_scanning(c: &mut Criterion) {
    let payload = make_text_payload(64 * 1024);
    let mut group = c.benchmark_group("prefix_scanning");
    group.throughput(Throughput::Bytes(payload.len() as u64));

    group.bench_function("char_consume_words", |b| {
        b.iter(|| {
            let mut cursor = CharCursor::new(black_box(payload.as_bytes()));
            let mut words = 0usize;
            while !cursor.is_done() {
                if cursor.consume("hello") || cursor.consume("日本") {
                    words += 1;
                } else if cursor.peek_at(3).is_some() && cursor.has_prefix("ASC") {
                    cursor.advance(3).ok();
                } else {
                    cursor.advance(1).ok();
                }
            }
            black_box((words, cursor.line_number()));
        });
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_units, bench_prefix_scanning
}
criterion_main!(benches);
