// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use dynarr::DynArray;
use dynarr_buffer::Buffer;

// Fast mode: FAST_BENCH=1 cargo bench -p benchmarks --bench dynarr
fn is_fast_mode() -> bool {
    std::env::var("FAST_BENCH")
        .map(|v| v == "1")
        .unwrap_or(false)
}

fn configure_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    if is_fast_mode() {
        group.measurement_time(std::time::Duration::from_millis(500));
        group.sample_size(10);
    } else {
        group.measurement_time(std::time::Duration::from_secs(3));
        group.sample_size(50);
    }
}

// =============================================================================
// Vec vs DynArray
// =============================================================================

fn bench_push_from_empty(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_from_empty");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..s {
                    vec.push(i as u64);
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("DynArray", size), &size, |b, &s| {
            b.iter(|| {
                let mut array = DynArray::new();
                for i in 0..s {
                    array.push(i as u64).expect("Failed to push(..)");
                }
                black_box(array)
            });
        });
    }

    group.finish();
}

fn bench_push_reserved(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_reserved");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            let mut vec = Vec::with_capacity(s);
            b.iter(|| {
                vec.clear();
                for i in 0..s {
                    vec.push(i as u64);
                }
                black_box(&vec);
            });
        });

        group.bench_with_input(BenchmarkId::new("DynArray", size), &size, |b, &s| {
            let mut array = DynArray::with_capacity(s).expect("Failed to with_capacity(..)");
            b.iter(|| {
                array.clear();
                for i in 0..s {
                    array.push(i as u64).expect("Failed to push(..)");
                }
                black_box(&array);
            });
        });
    }

    group.finish();
}

fn bench_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone");
    configure_group(&mut group);

    for size in [100, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            let vec: Vec<u64> = (0..s as u64).collect();
            b.iter(|| black_box(vec.clone()));
        });

        group.bench_with_input(BenchmarkId::new("DynArray", size), &size, |b, &s| {
            let array = DynArray::from_elem(s, 7u64).expect("Failed to from_elem(..)");
            b.iter(|| black_box(array.clone()));
        });
    }

    group.finish();
}

fn bench_erase_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase_front");
    configure_group(&mut group);

    for size in [100, 10_000] {
        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s as u64).collect::<Vec<_>>(),
                |mut vec| {
                    let index = vec.iter().position(|x| *x == 0);
                    black_box(index.map(|i| vec.remove(i)))
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("DynArray", size), &size, |b, &s| {
            b.iter_batched(
                || {
                    let mut array = DynArray::with_capacity(s).expect("Failed to with_capacity(..)");
                    for i in 0..s as u64 {
                        array.push(i).expect("Failed to push(..)");
                    }
                    array
                },
                |mut array| black_box(array.erase(&0)),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// Buffer
// =============================================================================

fn bench_buffer_reserve(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_reserve");
    configure_group(&mut group);

    for size in [1_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("grow_x2", size), &size, |b, &s| {
            b.iter_batched(
                || Buffer::from_elem(s, 1u64).expect("Failed to from_elem(..)"),
                |mut buffer| {
                    buffer.reserve(2 * s).expect("Failed to reserve(..)");
                    black_box(buffer)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    dynarr_benches,
    bench_push_from_empty,
    bench_push_reserved,
    bench_clone,
    bench_erase_front
);

criterion_group!(buffer_benches, bench_buffer_reserve);

criterion_main!(dynarr_benches, buffer_benches);
