//! # Repository Metrics
//!
//! Prometheus metrics for repository saves and loads.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! mr-metrics-repository = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `mr_repository_saves_total{outcome}` - Counter of save attempts
//! - `mr_repository_loads_total{outcome}` - Counter of load attempts
//! - `mr_repository_entries` - Gauge of entries in the document after the last save
//! - `mr_repository_save_duration_seconds` - Histogram of read-modify-write time

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_histogram, register_int_counter_vec, register_int_gauge, Histogram, IntCounterVec,
    IntGauge,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Save attempts, labeled by outcome (`ok`, `store_unavailable`, `corrupt_store`)
    pub static ref SAVES: IntCounterVec = register_int_counter_vec!(
        "mr_repository_saves_total",
        "Total number of save_or_append calls",
        &["outcome"]
    )
    .expect("Failed to create SAVES metric");

    /// Load attempts, labeled by outcome
    pub static ref LOADS: IntCounterVec = register_int_counter_vec!(
        "mr_repository_loads_total",
        "Total number of load calls",
        &["outcome"]
    )
    .expect("Failed to create LOADS metric");

    /// Entries in the document after the last successful save
    pub static ref ENTRIES: IntGauge = register_int_gauge!(
        "mr_repository_entries",
        "Number of entries in the metrics document"
    )
    .expect("Failed to create ENTRIES metric");

    /// Read-modify-write duration
    pub static ref SAVE_DURATION: Histogram = register_histogram!(
        "mr_repository_save_duration_seconds",
        "Time spent in save_or_append"
    )
    .expect("Failed to create SAVE_DURATION metric");
}

/// Record a save attempt
#[cfg(feature = "metrics")]
pub fn record_save(outcome: &str, seconds: f64) {
    SAVES.with_label_values(&[outcome]).inc();
    SAVE_DURATION.observe(seconds);
}

/// Record the entry count after a save
#[cfg(feature = "metrics")]
pub fn set_entries(count: usize) {
    ENTRIES.set(count as i64);
}

/// Record a load attempt
#[cfg(feature = "metrics")]
pub fn record_load(outcome: &str) {
    LOADS.with_label_values(&[outcome]).inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_save(_outcome: &str, _seconds: f64) {}

#[cfg(not(feature = "metrics"))]
pub fn set_entries(_count: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_load(_outcome: &str) {}
