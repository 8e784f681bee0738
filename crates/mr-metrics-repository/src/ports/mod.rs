//! # Ports Layer
//!
//! Defines the port traits for the metrics repository.
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving ports (API exposed to callers)
//! - `outbound.rs` - Driven ports (backing medium and document codec)

pub mod inbound;
pub mod outbound;
