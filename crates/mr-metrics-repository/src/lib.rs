//! # Metrics Repository
//!
//! Append-only persistence and query layer for data-quality metrics.
//!
//! An external analysis engine computes metrics (completeness, correlation,
//! approximate distinct counts, ...) for a dataset. Each run is saved under
//! a `ResultKey` (timestamp + tags); later runs under an equal key merge into
//! the same entry. Queries narrow the stored runs by time range, tags and
//! analyzer and flatten them into tables for presentation.
//!
//! ## Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Unique metric identity | `(entity, instance, name)` is unique within an entry |
//! | Merge on equal key | Saving under an existing key merges, incoming values win |
//! | Immutable keys | An entry's key never changes; only its metric set grows |
//! | Append order | Query rows follow append order, then metric insertion order |
//! | Atomic replace | A failed write never leaves a truncated document |
//! | Fail closed | A malformed document is rejected whole, never partially loaded |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Pure domain logic (keys, metrics, merge, query, tables)
//! - `ports/` - Port traits (inbound API, outbound document store and codec)
//! - `adapters/` - In-memory and file stores, JSON codec, write lock
//! - `service/` - Application service implementing the API
//!
//! ## Usage
//!
//! ```no_run
//! use mr_metrics_repository::{
//!     AnalysisResult, AnalyzerId, MetricRecord, MetricsRepositoryApi,
//!     MetricsRepositoryService, ResultKey, Tags,
//! };
//!
//! # fn main() -> Result<(), mr_metrics_repository::RepositoryError> {
//! let mut repository = MetricsRepositoryService::file_backed("/tmp/metrics.json");
//!
//! let key = ResultKey::new(1_700_000_000_000, Tags::new().with("tag", "books"));
//! let result = AnalysisResult::new()
//!     .with(MetricRecord::success(AnalyzerId::dataset("Size"), 200.0));
//! repository.save_or_append(key, result)?;
//!
//! let table = repository
//!     .load()?
//!     .after(1_600_000_000_000)
//!     .with_tag_values(&Tags::new().with("tag", "books"))
//!     .get_success_metrics_as_table();
//! println!("{table}");
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export key types for convenience
pub use adapters::{FileDocumentStore, InMemoryDocumentStore, JsonDocumentCodec};
pub use domain::analysis::AnalysisResult;
pub use domain::entry::{RepositoryEntry, SaveOutcome};
pub use domain::errors::{CodecError, DocumentStoreError, RepositoryError};
pub use domain::metric::{AnalyzerId, Entity, MetricFailure, MetricRecord, MetricValue};
pub use domain::query::{MetricRow, MetricsRepositoryQuery, MetricsTable};
pub use domain::result_key::{ResultKey, Timestamp};
pub use domain::tags::Tags;
pub use domain::value_objects::{Backend, RepositoryConfig};
pub use ports::inbound::MetricsRepositoryApi;
pub use ports::outbound::{DocumentCodec, DocumentStore, UpdateGuard};
pub use service::{
    ConfiguredMetricsRepository, MetricsRepositoryDependencies, MetricsRepositoryService,
};
