//! Benchmarks for the filing and registration sweep paths.
//!
//! Measures how builder chains scale with entry count and what the sweep
//! itself costs once everything is filed.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use modkit::prelude::*;

fn file_blocks(count: usize) -> Registrar {
    let reg = Registrar::new("bench");
    reg.dev_mode(false);
    for i in 0..count {
        reg.object(format!("block_{i}"))
            .block(Block::new)
            .unwrap()
            .register()
            .unwrap();
    }
    reg
}

fn bench_filing(c: &mut Criterion) {
    let mut group = c.benchmark_group("filing");
    for count in [10usize, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("blocks_{count}"), |b| {
            b.iter(|| black_box(file_blocks(count)));
        });
    }
    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    for count in [10usize, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("blocks_{count}"), |b| {
            b.iter_batched(
                || (file_blocks(count), standard_host()),
                |(reg, mut host)| {
                    reg.register(&mut host).unwrap();
                    black_box(host);
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filing, bench_sweep);
criterion_main!(benches);
