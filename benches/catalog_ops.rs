//! Catalog micro-benchmarks, comparing the two table backends.
//!
//! Run with:
//! ```bash
//! cargo bench --bench catalog_ops
//! ```

use catalog_rs::store::CatalogStore;
use catalog_rs::table::{ChainedTable, OpenTable, Table};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Generate deterministic distinct ids for reproducible benchmarks.
fn random_ids(seed: u64, count: usize) -> Vec<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ids: Vec<i64> = (0..count as i64).map(|i| i * 3).collect();
    ids.shuffle(&mut rng);
    ids
}

fn filled<T: Table>(ids: &[i64]) -> CatalogStore<T> {
    let mut store = CatalogStore::<T>::new();
    for &id in ids {
        store.insert(id, "bench", 1.0, 10).unwrap();
    }
    store
}

// ============================================================================
// Benchmark: Insert (includes every resize from the initial capacity)
// ============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog/insert");

    for n in [1_000, 10_000, 100_000] {
        let ids = random_ids(42, n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("open", n), &ids, |b, ids| {
            b.iter(|| filled::<OpenTable>(ids));
        });
        group.bench_with_input(BenchmarkId::new("chained", n), &ids, |b, ids| {
            b.iter(|| filled::<ChainedTable>(ids));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Lookup (hits and misses)
// ============================================================================

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog/search");

    for n in [1_000, 10_000, 100_000] {
        let ids = random_ids(42, n);
        // Half of the probes miss: ids are multiples of 3.
        let probes: Vec<i64> = ids.iter().map(|&id| id + (id % 2)).collect();

        let open = filled::<OpenTable>(&ids);
        let chained = filled::<ChainedTable>(&ids);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("open", n), &probes, |b, probes| {
            b.iter(|| probes.iter().filter(|&&id| open.search(id).is_some()).count());
        });
        group.bench_with_input(BenchmarkId::new("chained", n), &probes, |b, probes| {
            b.iter(|| probes.iter().filter(|&&id| chained.search(id).is_some()).count());
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Delete half, then look everything up
// ============================================================================

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog/churn");

    let n = 10_000;
    let ids = random_ids(7, n);
    group.throughput(Throughput::Elements(n as u64));

    group.bench_function(BenchmarkId::new("open", n), |b| {
        b.iter_with_setup(
            || filled::<OpenTable>(&ids),
            |mut store| {
                for id in ids.iter().step_by(2) {
                    store.delete(*id).unwrap();
                }
                ids.iter().filter(|&&id| store.search(id).is_some()).count()
            },
        );
    });
    group.bench_function(BenchmarkId::new("chained", n), |b| {
        b.iter_with_setup(
            || filled::<ChainedTable>(&ids),
            |mut store| {
                for id in ids.iter().step_by(2) {
                    store.delete(*id).unwrap();
                }
                ids.iter().filter(|&&id| store.search(id).is_some()).count()
            },
        );
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_search, bench_churn);
criterion_main!(benches);
