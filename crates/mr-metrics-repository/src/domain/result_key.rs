//! # Result Key
//!
//! Identifies one analysis run: a timestamp plus a tag set.

use crate::domain::tags::Tags;
use std::fmt;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Identity of one analysis run.
///
/// Immutable once constructed. Two keys are equal when both the timestamp
/// and the tag sets are equal; saving twice under an equal key merges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultKey {
    dataset_date: Timestamp,
    tags: Tags,
}

impl ResultKey {
    pub fn new(dataset_date: Timestamp, tags: Tags) -> Self {
        Self { dataset_date, tags }
    }

    /// Key without tags.
    pub fn untagged(dataset_date: Timestamp) -> Self {
        Self::new(dataset_date, Tags::new())
    }

    /// Key stamped with the current wall-clock time.
    pub fn now(tags: Tags) -> Self {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as Timestamp)
            .unwrap_or(0);
        Self::new(millis, tags)
    }

    pub fn dataset_date(&self) -> Timestamp {
        self.dataset_date
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }
}

impl fmt::Display for ResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.dataset_date, self.tags)
    }
}
