//! # Metrics Repository Telemetry
//!
//! Logging setup and metrics export shared by the metrics repository tools.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mr_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config).expect("Failed to init logging");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MR_SERVICE_NAME` | `metrics-repository` | Service name in logs |
//! | `MR_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `MR_JSON_LOGS` | `false` | JSON formatted logs |
//! | `MR_LOG_TARGET` | `true` | Include module targets |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::render_metrics;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logger: {0}")]
    LoggerInit(String),

    #[error("Failed to export Prometheus metrics: {0}")]
    MetricsExport(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
