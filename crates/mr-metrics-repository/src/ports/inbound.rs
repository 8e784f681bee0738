//! # Inbound Ports (Driving Ports)
//!
//! The primary API of the metrics repository.

use crate::domain::analysis::AnalysisResult;
use crate::domain::errors::RepositoryError;
use crate::domain::query::MetricsRepositoryQuery;
use crate::domain::result_key::ResultKey;

/// Persistence and query API for analysis results.
///
/// All operations are synchronous and run to completion on the caller's
/// thread. Writers sharing one persistent document from several processes
/// must be serialized (see `RepositoryConfig::lock_writes`).
pub trait MetricsRepositoryApi {
    /// Store `result` under `key`.
    ///
    /// If an entry with an equal key exists, `result` is merged into it and
    /// incoming values overwrite colliding analyzer identities. Otherwise a
    /// new entry is appended.
    ///
    /// ## Errors
    ///
    /// - `StoreUnavailable`: the medium could not be read or written
    /// - `CorruptStore`: the existing document could not be parsed
    fn save_or_append(&mut self, key: ResultKey, result: AnalysisResult)
        -> Result<(), RepositoryError>;

    /// Query builder seeded with every stored entry.
    ///
    /// ## Errors
    ///
    /// - `StoreUnavailable`: the medium could not be read
    /// - `CorruptStore`: the stored document could not be parsed
    fn load(&self) -> Result<MetricsRepositoryQuery, RepositoryError>;

    /// Metrics stored under exactly `key`, if any.
    fn load_by_key(&self, key: &ResultKey) -> Result<Option<AnalysisResult>, RepositoryError> {
        Ok(self
            .load()?
            .get()
            .into_iter()
            .find(|entry| entry.result_key() == key)
            .map(|entry| entry.into_parts().1))
    }
}
