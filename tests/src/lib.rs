//! # Metrics Repository Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion groups for save and query throughput
//! └── integration/      # Cross-crate flows (repository + telemetry)
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p mr-tests
//!
//! # Integration flows only
//! cargo test -p mr-tests integration::
//!
//! # Benchmarks
//! cargo bench -p mr-tests
//! ```

pub mod benchmarks;
pub mod fixtures;
pub mod integration;
