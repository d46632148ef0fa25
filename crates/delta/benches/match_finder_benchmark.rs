//! crates/delta/benches/match_finder_benchmark.rs
//!
//! Benchmarks the seed-index scan tier against synthetic inputs of
//! increasing size and edit distance.
//!
//! Run with: `cargo bench -p delta`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use delta::deltify;

fn repeating_buffer(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

fn with_scattered_edits(base: &[u8], stride: usize) -> Vec<u8> {
    let mut out = base.to_vec();
    let mut i = stride;
    while i < out.len() {
        out[i] = out[i].wrapping_add(1);
        i += stride;
    }
    out
}

fn bench_deltify(c: &mut Criterion) {
    let mut group = c.benchmark_group("deltify");

    for size in [4096, 65536, 1 << 20] {
        let base = repeating_buffer(size);
        let new_buf = with_scattered_edits(&base, 4096);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("scattered_edits", size), &(), |b, ()| {
            b.iter(|| black_box(deltify(black_box(&base), black_box(&new_buf)).unwrap()));
        });
    }

    group.finish();
}

fn bench_tail_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("deltify_tail_append");

    for size in [4096, 65536, 1 << 20] {
        let base = repeating_buffer(size);
        let mut new_buf = base.clone();
        new_buf.extend_from_slice(b"appended tail bytes");

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("tail_append", size), &(), |b, ()| {
            b.iter(|| black_box(deltify(black_box(&base), black_box(&new_buf)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_deltify, bench_tail_append);
criterion_main!(benches);
