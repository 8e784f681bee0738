//! # Metrics Repository Benchmarks
//!
//! Criterion groups driven from `benches/repository_benchmarks.rs`.

pub mod repository;
