//! # Metric Records
//!
//! One scalar measurement (or failure) for an entity/instance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a metric describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Entity {
    /// The whole dataset (instance `"*"`).
    Dataset,
    /// A single column.
    Column,
    /// Several columns, instance is the comma-joined column list.
    Multicolumn,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Dataset => "Dataset",
            Entity::Column => "Column",
            Entity::Multicolumn => "Multicolumn",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Dataset" => Ok(Entity::Dataset),
            "Column" => Ok(Entity::Column),
            "Multicolumn" => Ok(Entity::Multicolumn),
            other => Err(format!("unknown entity '{other}'")),
        }
    }
}

/// Identity of an analyzer: unique within one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnalyzerId {
    pub entity: Entity,
    pub instance: String,
    pub name: String,
}

impl AnalyzerId {
    pub fn new(entity: Entity, instance: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            entity,
            instance: instance.into(),
            name: name.into(),
        }
    }

    /// Whole-dataset analyzer, e.g. `Size`.
    pub fn dataset(name: impl Into<String>) -> Self {
        Self::new(Entity::Dataset, "*", name)
    }

    pub fn column(column: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Entity::Column, column, name)
    }

    pub fn multicolumn(columns: &[&str], name: impl Into<String>) -> Self {
        Self::new(Entity::Multicolumn, columns.join(","), name)
    }
}

impl fmt::Display for AnalyzerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}).{}", self.entity, self.instance, self.name)
    }
}

/// Failure marker carried in place of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricFailure {
    pub message: String,
}

/// Outcome of computing one metric.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Success(f64),
    Failure(MetricFailure),
}

impl MetricValue {
    pub fn failure(message: impl Into<String>) -> Self {
        MetricValue::Failure(MetricFailure {
            message: message.into(),
        })
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Success(v) => Some(*v),
            MetricValue::Failure(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MetricValue::Success(_))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Success(v) => write!(f, "{v:?}"),
            MetricValue::Failure(failure) => f.write_str(&failure.message),
        }
    }
}

/// One named measurement for an entity/instance.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub entity: Entity,
    pub instance: String,
    pub name: String,
    pub value: MetricValue,
}

impl MetricRecord {
    pub fn new(id: AnalyzerId, value: MetricValue) -> Self {
        Self {
            entity: id.entity,
            instance: id.instance,
            name: id.name,
            value,
        }
    }

    pub fn success(id: AnalyzerId, value: f64) -> Self {
        Self::new(id, MetricValue::Success(value))
    }

    pub fn failure(id: AnalyzerId, message: impl Into<String>) -> Self {
        Self::new(id, MetricValue::failure(message))
    }

    pub fn id(&self) -> AnalyzerId {
        AnalyzerId::new(self.entity, self.instance.clone(), self.name.clone())
    }

    pub fn is_success(&self) -> bool {
        self.value.is_success()
    }

    pub(crate) fn matches(&self, id: &AnalyzerId) -> bool {
        self.entity == id.entity && self.instance == id.instance && self.name == id.name
    }
}
