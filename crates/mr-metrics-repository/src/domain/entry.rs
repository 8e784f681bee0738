//! # Repository Entries
//!
//! The persisted unit and the pure merge-or-append algorithm over the entry log.

use crate::domain::analysis::AnalysisResult;
use crate::domain::result_key::ResultKey;

/// One result key paired with every metric computed under it.
///
/// The key is fixed once the entry exists; only the metric set grows.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryEntry {
    result_key: ResultKey,
    metrics: AnalysisResult,
}

impl RepositoryEntry {
    pub fn new(result_key: ResultKey, metrics: AnalysisResult) -> Self {
        Self {
            result_key,
            metrics,
        }
    }

    pub fn result_key(&self) -> &ResultKey {
        &self.result_key
    }

    pub fn metrics(&self) -> &AnalysisResult {
        &self.metrics
    }

    pub(crate) fn metrics_mut(&mut self) -> &mut AnalysisResult {
        &mut self.metrics
    }

    pub fn into_parts(self) -> (ResultKey, AnalysisResult) {
        (self.result_key, self.metrics)
    }

    /// Merge a later run's metrics into this entry.
    pub fn merge(&mut self, result: AnalysisResult) {
        self.metrics.merge(result);
    }
}

/// What `save_or_append` did to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new entry was appended at this index.
    Appended(usize),
    /// The entry at this index already had the key and was merged into.
    Merged(usize),
}

/// Merge `result` into the entry with an equal key, or append a new entry.
///
/// Order of existing entries is never changed.
pub fn save_or_append(
    entries: &mut Vec<RepositoryEntry>,
    key: ResultKey,
    result: AnalysisResult,
) -> SaveOutcome {
    match entries.iter().position(|entry| entry.result_key == key) {
        Some(index) => {
            entries[index].merge(result);
            SaveOutcome::Merged(index)
        }
        None => {
            entries.push(RepositoryEntry::new(key, result));
            SaveOutcome::Appended(entries.len() - 1)
        }
    }
}
