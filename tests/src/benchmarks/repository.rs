//! # Repository Throughput
//!
//! - save: read-modify-write cost as the document grows
//! - query: narrowing plus table flattening over a populated store

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use mr_metrics_repository::{
    InMemoryDocumentStore, JsonDocumentCodec, MetricsRepositoryApi, MetricsRepositoryService, Tags,
};

use crate::fixtures::{daily_key, reviews_run, MARKETPLACES};

const STORE_SIZES: [u64; 3] = [10, 100, 1000];

type InMemoryRepository = MetricsRepositoryService<InMemoryDocumentStore, JsonDocumentCodec>;

fn populated_in_memory(entries: u64) -> InMemoryRepository {
    let mut repo = MetricsRepositoryService::in_memory();
    for i in 0..entries {
        let marketplace = MARKETPLACES[(i % MARKETPLACES.len() as u64) as usize];
        // Saves only fail on an unreachable medium, never in memory.
        let _ = repo.save_or_append(daily_key(i, marketplace), reviews_run(i as f64));
    }
    repo
}

pub fn bench_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("repository-save");

    for size in STORE_SIZES {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("in_memory_append", size), &size, |b, &size| {
            b.iter_batched(
                || populated_in_memory(size),
                |mut repo| {
                    black_box(repo.save_or_append(daily_key(size + 1, "US"), reviews_run(1.0)))
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    let dir = std::env::temp_dir().join("mr-bench-save");
    let _ = std::fs::create_dir_all(&dir);
    let path = dir.join("metrics.json");
    let _ = std::fs::remove_file(&path);
    let mut repo = MetricsRepositoryService::file_backed(&path);
    let mut day = 0u64;
    group.bench_function("file_merge_same_key", |b| {
        b.iter(|| {
            day += 1;
            black_box(repo.save_or_append(daily_key(0, "US"), reviews_run(day as f64)))
        })
    });

    group.finish();
}

pub fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("repository-query");
    let filter = Tags::new().with("marketplace", "EU");

    for size in STORE_SIZES {
        let repo = populated_in_memory(size);
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("load_filter_table", size), &size, |b, &size| {
            b.iter(|| {
                let table = repo.load().map(|query| {
                    query
                        .after(daily_key(size / 4, "US").dataset_date())
                        .with_tag_values(&filter)
                        .get_success_metrics_as_table()
                });
                black_box(table)
            })
        });
    }

    group.finish();
}
