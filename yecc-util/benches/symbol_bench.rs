//! Symbol interning benchmarks.
//!
//! Run with: `cargo bench --bench symbol_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use yecc_util::Interner;

fn bench_intern(c: &mut Criterion) {
    let mut group = c.benchmark_group("intern");
    group.throughput(Throughput::Elements(1));

    group.bench_function("intern_new_string", |b| {
        let mut interner = Interner::new();
        let mut counter = 0u64;
        b.iter(|| {
            counter += 1;
            interner.intern(&format!("new_string_{counter}"))
        })
    });

    group.bench_function("intern_existing_string", |b| {
        let mut interner = Interner::new();
        interner.intern("existing_string");
        b.iter(|| black_box(interner.intern("existing_string")))
    });

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let mut interner = Interner::new();
    let sym = interner.intern("hello_world");

    group.bench_function("resolve_symbol", |b| {
        b.iter(|| black_box(interner.resolve(sym)))
    });

    group.finish();
}

criterion_group!(benches, bench_intern, bench_resolve);
criterion_main!(benches);
