//! # Domain Layer
//!
//! Pure domain logic for the metrics repository. Nothing here performs I/O:
//! the merge and query algorithms are independent of the backing medium.
//!
//! ## Modules
//!
//! - `tags` - Ordered tag mapping with value equality
//! - `result_key` - Run identity (timestamp + tags)
//! - `metric` - Entities, analyzer identities, metric values and records
//! - `analysis` - Per-run metric bag
//! - `entry` - Persisted entries and the merge-or-append algorithm
//! - `query` - Query builder and tabular results
//! - `value_objects` - Configuration
//! - `errors` - Error types

pub mod analysis;
pub mod entry;
pub mod errors;
pub mod metric;
pub mod query;
pub mod result_key;
pub mod tags;
pub mod value_objects;
