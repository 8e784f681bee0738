//! # Integration Flows
//!
//! Repository behavior exercised through its public API only, together with
//! the telemetry crate that exports its metrics.

pub mod flows;
