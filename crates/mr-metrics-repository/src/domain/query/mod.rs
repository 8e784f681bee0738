//! # Repository Query
//!
//! Builder over a snapshot of repository entries.
//!
//! Narrowing calls compose as a logical AND and commute: every filter is a
//! predicate on a single entry (or a single metric within an entry), so the
//! order of calls never changes the result. Nothing here touches the store.

mod table;

pub use table::{MetricRow, MetricsTable, RowSelection, FIXED_COLUMNS};

use crate::domain::entry::RepositoryEntry;
use crate::domain::metric::AnalyzerId;
use crate::domain::result_key::Timestamp;
use crate::domain::tags::Tags;

/// Query builder returned by `MetricsRepositoryApi::load`.
#[derive(Debug, Clone, Default)]
pub struct MetricsRepositoryQuery {
    entries: Vec<RepositoryEntry>,
}

impl MetricsRepositoryQuery {
    /// Seed a query with every entry in append order.
    pub fn new(entries: Vec<RepositoryEntry>) -> Self {
        Self { entries }
    }

    /// Keep entries with `dataset_date < timestamp` (exclusive).
    pub fn before(mut self, timestamp: Timestamp) -> Self {
        self.entries
            .retain(|entry| entry.result_key().dataset_date() < timestamp);
        self
    }

    /// Keep entries with `dataset_date > timestamp` (exclusive).
    pub fn after(mut self, timestamp: Timestamp) -> Self {
        self.entries
            .retain(|entry| entry.result_key().dataset_date() > timestamp);
        self
    }

    /// Keep entries whose tags contain every pair in `required`.
    pub fn with_tag_values(mut self, required: &Tags) -> Self {
        self.entries
            .retain(|entry| entry.result_key().tags().contains_all(required));
        self
    }

    /// Keep only metrics produced by one of `analyzers`.
    ///
    /// Entries left without any metric are dropped.
    pub fn for_analyzers(mut self, analyzers: &[AnalyzerId]) -> Self {
        for entry in &mut self.entries {
            entry.metrics_mut().retain_analyzers(analyzers);
        }
        self.entries.retain(|entry| !entry.metrics().is_empty());
        self
    }

    /// Number of entries surviving the filters so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Surviving entries, in append order.
    pub fn get(self) -> Vec<RepositoryEntry> {
        self.entries
    }

    /// One row per successful metric, with every observed tag as a column.
    pub fn get_success_metrics_as_table(&self) -> MetricsTable {
        MetricsTable::build(&self.entries, RowSelection::Success, &[])
    }

    /// One row per failed metric, `value` holding the failure message.
    pub fn get_failed_metrics_as_table(&self) -> MetricsTable {
        MetricsTable::build(&self.entries, RowSelection::Failed, &[])
    }

    /// Like `get_success_metrics_as_table`, restricted to the tag columns in `with_tags`.
    pub fn get_success_metrics_as_table_with_tags(&self, with_tags: &[&str]) -> MetricsTable {
        MetricsTable::build(&self.entries, RowSelection::Success, with_tags)
    }

    pub fn get_failed_metrics_as_table_with_tags(&self, with_tags: &[&str]) -> MetricsTable {
        MetricsTable::build(&self.entries, RowSelection::Failed, with_tags)
    }

    /// Successful metrics as a JSON array of row objects.
    pub fn get_success_metrics_as_json(&self) -> String {
        self.get_success_metrics_as_table().to_json()
    }

    pub fn get_failed_metrics_as_json(&self) -> String {
        self.get_failed_metrics_as_table().to_json()
    }
}
