//! # Metrics Tables
//!
//! Flattened view of repository entries handed to the presentation layer.
//!
//! Row schema: `entity, instance, name, value, dataset_date`, then one column
//! per tag key. Rows follow entry append order, then metric insertion order.

use crate::domain::entry::RepositoryEntry;
use crate::domain::metric::{Entity, MetricValue};
use crate::domain::result_key::Timestamp;
use serde_json::{Map, Number, Value};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Columns present in every table, in order.
pub const FIXED_COLUMNS: [&str; 5] = ["entity", "instance", "name", "value", "dataset_date"];

/// Which records a table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSelection {
    Success,
    Failed,
}

/// One flattened metric.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub entity: Entity,
    pub instance: String,
    pub name: String,
    /// Numeric value in a success table, failure marker in a failed table.
    pub value: MetricValue,
    pub dataset_date: Timestamp,
    /// Tag cells aligned with `MetricsTable::tag_keys`; `None` when the entry lacks the tag.
    pub tags: Vec<Option<String>>,
}

/// Tabular query result.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsTable {
    tag_keys: Vec<String>,
    columns: Vec<String>,
    rows: Vec<MetricRow>,
}

impl MetricsTable {
    /// Flatten `entries`.
    ///
    /// With an empty `with_tags`, one tag column is emitted per distinct key
    /// observed across `entries` (sorted). Otherwise exactly the listed keys
    /// are emitted, in the listed order.
    pub(crate) fn build(
        entries: &[RepositoryEntry],
        selection: RowSelection,
        with_tags: &[&str],
    ) -> Self {
        let tag_keys: Vec<String> = if with_tags.is_empty() {
            entries
                .iter()
                .flat_map(|entry| entry.result_key().tags().keys())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(str::to_string)
                .collect()
        } else {
            let mut keys: Vec<String> = Vec::with_capacity(with_tags.len());
            for key in with_tags {
                if !keys.iter().any(|k| k == key) {
                    keys.push((*key).to_string());
                }
            }
            keys
        };

        let mut columns: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend(tag_column_names(&tag_keys));

        let mut rows = Vec::new();
        for entry in entries {
            let key = entry.result_key();
            let tags: Vec<Option<String>> = tag_keys
                .iter()
                .map(|tag| key.tags().get(tag).map(str::to_string))
                .collect();

            for record in entry.metrics().iter() {
                let keep = match selection {
                    RowSelection::Success => record.is_success(),
                    RowSelection::Failed => !record.is_success(),
                };
                if !keep {
                    continue;
                }
                rows.push(MetricRow {
                    entity: record.entity,
                    instance: record.instance.clone(),
                    name: record.name.clone(),
                    value: record.value.clone(),
                    dataset_date: key.dataset_date(),
                    tags: tags.clone(),
                });
            }
        }

        Self {
            tag_keys,
            columns,
            rows,
        }
    }

    /// Column headers, fixed columns first.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Raw tag keys backing the tag columns.
    pub fn tag_keys(&self) -> &[String] {
        &self.tag_keys
    }

    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tag cell of `row` for the raw tag `key`.
    pub fn tag<'a>(&self, row: &'a MetricRow, key: &str) -> Option<&'a str> {
        let index = self.tag_keys.iter().position(|k| k == key)?;
        row.tags.get(index)?.as_deref()
    }

    /// Rows as JSON objects keyed by column name.
    ///
    /// Non-finite values become `null`; failure markers become their message.
    pub fn to_json_rows(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut object = Map::new();
                object.insert("entity".into(), Value::String(row.entity.to_string()));
                object.insert("instance".into(), Value::String(row.instance.clone()));
                object.insert("name".into(), Value::String(row.name.clone()));
                let value = match &row.value {
                    MetricValue::Success(v) => {
                        Number::from_f64(*v).map(Value::Number).unwrap_or(Value::Null)
                    }
                    MetricValue::Failure(failure) => Value::String(failure.message.clone()),
                };
                object.insert("value".into(), value);
                object.insert("dataset_date".into(), Value::from(row.dataset_date));
                for (column, cell) in self.columns[FIXED_COLUMNS.len()..].iter().zip(&row.tags) {
                    let cell = cell.clone().map(Value::String).unwrap_or(Value::Null);
                    object.insert(column.clone(), cell);
                }
                Value::Object(object)
            })
            .collect()
    }

    /// Rows as a JSON array string.
    pub fn to_json(&self) -> String {
        Value::Array(self.to_json_rows()).to_string()
    }

    fn cells(&self, row: &MetricRow) -> Vec<String> {
        let mut cells = vec![
            row.entity.to_string(),
            row.instance.clone(),
            row.name.clone(),
            row.value.to_string(),
            row.dataset_date.to_string(),
        ];
        cells.extend(
            row.tags
                .iter()
                .map(|cell| cell.clone().unwrap_or_else(|| "null".to_string())),
        );
        cells
    }
}

/// Column names for `tag_keys`, one per key and all distinct.
///
/// A key that shadows a fixed column is prefixed with `tag_` until the name
/// is neither a fixed column, another tag key, nor an already assigned name.
fn tag_column_names(tag_keys: &[String]) -> Vec<String> {
    let mut assigned: HashSet<String> = HashSet::with_capacity(tag_keys.len());
    tag_keys
        .iter()
        .map(|key| {
            let mut name = key.clone();
            if FIXED_COLUMNS.contains(&name.as_str()) {
                name = format!("tag_{name}");
                while FIXED_COLUMNS.contains(&name.as_str())
                    || tag_keys.contains(&name)
                    || assigned.contains(&name)
                {
                    name = format!("tag_{name}");
                }
            }
            assigned.insert(name.clone());
            name
        })
        .collect()
}

impl fmt::Display for MetricsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body: Vec<Vec<String>> = self.rows.iter().map(|row| self.cells(row)).collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for cells in &body {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let separator: String = widths
            .iter()
            .map(|w| format!("+{}", "-".repeat(*w)))
            .collect::<String>()
            + "+";

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("|{cell:<w$}", w = *w))
                .collect::<String>()
                + "|"
        };

        writeln!(f, "{separator}")?;
        writeln!(f, "{}", line(&self.columns))?;
        writeln!(f, "{separator}")?;
        for cells in &body {
            writeln!(f, "{}", line(cells))?;
        }
        write!(f, "{separator}")
    }
}
