//! Push-throughput benchmarks for cascade propagation.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use flowcell::{Cell, combine};

fn bench_map_chain(c: &mut Criterion) {
    c.bench_function("push through 4-deep map chain", |b| {
        let source = Cell::new(0i64);
        let tail = source
            .map(|v| v + 1)
            .map(|v| v * 2)
            .map(|v| v - 3)
            .map(|v| v ^ 0x5555);
        let mut i = 0i64;
        b.iter(|| {
            i += 1;
            source.push(black_box(i));
            black_box(tail.pull())
        });
    });
}

fn bench_reduce(c: &mut Criterion) {
    c.bench_function("push into reduce", |b| {
        let source = Cell::new(0i64);
        let total = source.reduce(|acc, v| acc.wrapping_add(v), 0i64);
        let mut i = 0i64;
        b.iter(|| {
            i += 1;
            source.push(black_box(i));
            black_box(total.pull())
        });
    });
}

fn bench_combine_fanin(c: &mut Criterion) {
    c.bench_function("push through 8-way combine", |b| {
        let sources: Vec<Cell<i64, i64>> = (0i64..8).map(Cell::new).collect();
        let views: Vec<&dyn flowcell::Readable<i64>> =
            sources.iter().map(|s| s as &dyn flowcell::Readable<i64>).collect();
        let total = combine(&views).map(|v| v.iter().sum::<i64>());
        let mut i = 0i64;
        b.iter(|| {
            i += 1;
            sources[(i % 8) as usize].push(black_box(i));
            black_box(total.pull())
        });
    });
}

criterion_group!(benches, bench_map_chain, bench_reduce, bench_combine_fanin);
criterion_main!(benches);
