//! # Metrics Repository Benchmarks
//!
//! | Group | Measures |
//! |-------|----------|
//! | repository-save | save_or_append as the document grows, merge into a file |
//! | repository-query | load + after + with_tag_values + success table |

use criterion::{criterion_group, criterion_main};
use mr_tests::benchmarks::repository::{bench_query, bench_save};

criterion_group!(benches, bench_save, bench_query);
criterion_main!(benches);
