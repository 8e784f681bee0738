//! Prometheus text exposition.
//!
//! Library crates register their collectors on the default registry (see
//! `mr_metrics_repository::metrics`); this module renders whatever has been
//! registered.

use prometheus::{Encoder, TextEncoder};

use crate::TelemetryError;

/// Render every metric in the default registry in text exposition format.
pub fn render_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsExport(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsExport(e.to_string()))
}
