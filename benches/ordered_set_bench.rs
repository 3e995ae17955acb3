//! OrderedSet benchmarks.
//!
//! Compares incremental `add` under different probe limits, lookups of
//! present and absent values, and removal from the middle of the order.
//!
//! Pre-generated inputs are reused via clone() in setup to avoid
//! regeneration overhead inside the measured closure.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use oset::OrderedSet;
use oset::config::SetConfig;
use std::hint::black_box;

const SIZES: [u64; 4] = [100, 1000, 10000, 100000];

/// Distinct values in a scrambled order.
fn generate_values(size: u64) -> Vec<u64> {
    (0..size).map(|index| index.wrapping_mul(0x9e37_79b9_7f4a_7c15)).collect()
}

fn batch_size_for(size: u64) -> BatchSize {
    if size < 1000 {
        BatchSize::SmallInput
    } else {
        BatchSize::LargeInput
    }
}

fn benchmark_add(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("ordered_set_add");

    for size in SIZES {
        let values = generate_values(size);
        for probe_limit in [1, 4, 16] {
            let config = SetConfig::new().with_probe_limit(probe_limit);
            group.bench_with_input(
                BenchmarkId::new(format!("probe_limit_{probe_limit}"), size),
                &size,
                |bencher, &size| {
                    bencher.iter_batched(
                        || values.clone(),
                        |values| {
                            let mut set = OrderedSet::with_config(config);
                            for value in values {
                                set.add(black_box(value));
                            }
                            black_box(set)
                        },
                        batch_size_for(size),
                    );
                },
            );
        }
    }

    group.finish();
}

fn benchmark_contains(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("ordered_set_contains");

    for size in SIZES {
        let values = generate_values(size);
        let set: OrderedSet<u64> = values.iter().copied().collect();
        group.bench_with_input(BenchmarkId::new("present", size), &set, |bencher, set| {
            bencher.iter(|| values.iter().filter(|value| set.contains(black_box(value))).count());
        });
        group.bench_with_input(BenchmarkId::new("absent", size), &set, |bencher, set| {
            bencher.iter(|| (0..size).filter(|value| set.contains(black_box(&(value * 2 + 1)))).count());
        });
    }

    group.finish();
}

fn benchmark_remove_middle(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("ordered_set_remove_middle");

    for size in SIZES {
        let values = generate_values(size);
        let set: OrderedSet<u64> = values.iter().copied().collect();
        let target = values[values.len() / 2];
        group.bench_with_input(BenchmarkId::new("remove", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || set.clone(),
                |mut set| {
                    black_box(set.remove(black_box(&target)));
                    set
                },
                batch_size_for(size),
            );
        });
    }

    group.finish();
}

fn benchmark_iterate(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("ordered_set_iterate");

    for size in SIZES {
        let set: OrderedSet<u64> = generate_values(size).into_iter().collect();
        group.bench_with_input(BenchmarkId::new("forward", size), &set, |bencher, set| {
            bencher.iter(|| set.iter().fold(0_u64, |sum, value| sum.wrapping_add(*value)));
        });
        group.bench_with_input(BenchmarkId::new("reverse", size), &set, |bencher, set| {
            bencher.iter(|| set.iter().rev().fold(0_u64, |sum, value| sum.wrapping_add(*value)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_add,
    benchmark_contains,
    benchmark_remove_middle,
    benchmark_iterate
);
criterion_main!(benches);
