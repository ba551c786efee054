#[macro_use]
extern crate criterion;

use criterion::{BatchSize, BenchmarkId, Criterion};

use pow2vec::Vector;

static SIZES: [usize; 4] = [16, 256, 4096, 65536];

fn push(c: &mut Criterion) {
    let mut g = c.benchmark_group("push");
    for size in &SIZES {
        g.bench_with_input(BenchmarkId::new("pow2vec", size), size, |b, size| {
            b.iter(|| {
                let mut v = Vector::new();
                for i in 0..*size {
                    v.push(i as u32);
                }
                std::hint::black_box(v);
            })
        });
        g.bench_with_input(BenchmarkId::new("std", size), size, |b, size| {
            b.iter(|| {
                let mut v = Vec::new();
                for i in 0..*size {
                    v.push(i as u32);
                }
                std::hint::black_box(v);
            })
        });
    }
}

fn insertion_index(c: &mut Criterion) {
    let mut g = c.benchmark_group("insertion_index");
    for size in &SIZES {
        let mut v = Vector::try_from_slice(&generate_items(*size)).unwrap();
        v.sort();
        let probes = generate_items(1024);

        g.bench_with_input(BenchmarkId::new("hybrid", size), size, |b, _| {
            b.iter(|| {
                for probe in &probes {
                    std::hint::black_box(v.insertion_index_sorted(probe));
                }
            })
        });
        g.bench_with_input(BenchmarkId::new("partition_point", size), size, |b, _| {
            b.iter(|| {
                for probe in &probes {
                    std::hint::black_box(v.partition_point(|x| x < probe));
                }
            })
        });
    }
}

fn sort(c: &mut Criterion) {
    let mut g = c.benchmark_group("sort");
    for size in &SIZES {
        let items = Vector::try_from_slice(&generate_items(*size)).unwrap();

        g.bench_with_input(BenchmarkId::new("quicksort", size), size, |b, _| {
            b.iter_batched(|| items.clone(), |mut v| { v.sort(); v }, BatchSize::SmallInput)
        });
        g.bench_with_input(BenchmarkId::new("sort_with", size), size, |b, _| {
            b.iter_batched(|| items.clone(), |mut v| { v.sort_with(|a, b| a.cmp(b)); v }, BatchSize::SmallInput)
        });
    }
}

pub fn generate_items(count: usize) -> Vec<u32> {
    let mut seed: u32 = 0x2545_f491;
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        items.push(seed % 100_000);
    }

    items
}

criterion_group!(vector, push, insertion_index, sort);
criterion_main!(vector);
