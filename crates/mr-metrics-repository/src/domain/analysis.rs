//! # Analysis Result
//!
//! The metric bag produced by one run of the external analysis engine.

use crate::domain::metric::{AnalyzerId, MetricRecord};
use std::collections::HashMap;

/// Insertion-ordered mapping from analyzer identity to metric record.
///
/// ## Invariant
///
/// The `(entity, instance, name)` triple is unique. Inserting a record whose
/// identity is already present replaces the value in place and keeps the
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisResult {
    records: Vec<MetricRecord>,
    /// Position of each identity in `records`.
    index: HashMap<AnalyzerId, usize>,
}

impl AnalysisResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record, returning the replaced one.
    pub fn insert(&mut self, record: MetricRecord) -> Option<MetricRecord> {
        let id = record.id();
        match self.position(&id) {
            Some(index) => Some(std::mem::replace(&mut self.records[index], record)),
            None => {
                self.index.insert(id, self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, record: MetricRecord) -> Self {
        self.insert(record);
        self
    }

    pub fn get(&self, id: &AnalyzerId) -> Option<&MetricRecord> {
        self.position(id).map(|index| &self.records[index])
    }

    pub fn contains(&self, id: &AnalyzerId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    /// Merge `other` into `self`; `other` wins on identity collisions.
    pub fn merge(&mut self, other: AnalysisResult) {
        for record in other.records {
            self.insert(record);
        }
    }

    /// Keep only the records produced by one of `ids`.
    pub fn retain_analyzers(&mut self, ids: &[AnalyzerId]) {
        self.records
            .retain(|record| ids.iter().any(|id| record.matches(id)));
        self.index = self
            .records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.id(), position))
            .collect();
    }

    fn position(&self, id: &AnalyzerId) -> Option<usize> {
        self.index.get(id).copied()
    }
}

impl FromIterator<MetricRecord> for AnalysisResult {
    fn from_iter<I: IntoIterator<Item = MetricRecord>>(iter: I) -> Self {
        let mut result = AnalysisResult::new();
        for record in iter {
            result.insert(record);
        }
        result
    }
}

impl IntoIterator for AnalysisResult {
    type Item = MetricRecord;
    type IntoIter = std::vec::IntoIter<MetricRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
