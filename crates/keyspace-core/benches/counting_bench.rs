use criterion::{criterion_group, criterion_main, Criterion};
use keyspace_core::config::KeyspaceParams;
use keyspace_core::engine::{
    BruteForceOracle, KeyCounter, PrefixSearchCounter, StateSpaceCounter, TransferMatrixCounter,
};
use std::hint::black_box;

fn criterion_benchmark(c: &mut Criterion) {
    let compact = KeyspaceParams::new(10, 6, 4);
    let small = KeyspaceParams::new(7, 5, 2);

    c.bench_function("transfer matrix (14, 8, 6)", |b| {
        let p = KeyspaceParams::new(14, 8, 6);
        b.iter(|| TransferMatrixCounter.count(black_box(&p)))
    });

    c.bench_function("state space (10, 6, 4)", |b| {
        let counter = StateSpaceCounter::new();
        b.iter(|| counter.count(black_box(&compact)))
    });

    c.bench_function("prefix search (7, 5, 2)", |b| {
        b.iter(|| PrefixSearchCounter.count(black_box(&small)))
    });

    c.bench_function("brute force (7, 5, 2)", |b| {
        b.iter(|| BruteForceOracle.count(black_box(&small)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
