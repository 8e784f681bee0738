//! JSON document codec.
//!
//! ```text
//! [
//!   {
//!     "resultKey": { "dataset_date": 1000, "tags": { "tag": "books" } },
//!     "metrics": [
//!       { "entity": "Dataset", "instance": "*", "name": "Size", "value": 200.0 },
//!       { "entity": "Column", "instance": "review_id", "name": "Mean",
//!         "value": { "failure": "column is not numeric" } }
//!     ]
//!   }
//! ]
//! ```
//!
//! Non-finite values are written as the strings `"NaN"`, `"Infinity"` and
//! `"-Infinity"` so the document round-trips exactly.

use crate::domain::analysis::AnalysisResult;
use crate::domain::entry::RepositoryEntry;
use crate::domain::errors::CodecError;
use crate::domain::metric::{Entity, MetricFailure, MetricRecord, MetricValue};
use crate::domain::result_key::{ResultKey, Timestamp};
use crate::domain::tags::Tags;
use crate::ports::outbound::DocumentCodec;
use serde::{Deserialize, Serialize};

const NAN: &str = "NaN";
const POS_INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";

#[derive(Debug, Serialize, Deserialize)]
struct WireEntry {
    #[serde(rename = "resultKey")]
    result_key: WireResultKey,
    metrics: Vec<WireMetric>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireResultKey {
    dataset_date: Timestamp,
    #[serde(default)]
    tags: Tags,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMetric {
    entity: Entity,
    instance: String,
    name: String,
    value: WireValue,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum WireValue {
    Number(f64),
    Symbol(String),
    Failure { failure: String },
}

impl From<&MetricValue> for WireValue {
    fn from(value: &MetricValue) -> Self {
        match value {
            MetricValue::Success(v) if v.is_nan() => WireValue::Symbol(NAN.to_string()),
            MetricValue::Success(v) if *v == f64::INFINITY => {
                WireValue::Symbol(POS_INFINITY.to_string())
            }
            MetricValue::Success(v) if *v == f64::NEG_INFINITY => {
                WireValue::Symbol(NEG_INFINITY.to_string())
            }
            MetricValue::Success(v) => WireValue::Number(*v),
            MetricValue::Failure(failure) => WireValue::Failure {
                failure: failure.message.clone(),
            },
        }
    }
}

impl TryFrom<WireValue> for MetricValue {
    type Error = CodecError;

    fn try_from(value: WireValue) -> Result<Self, Self::Error> {
        match value {
            WireValue::Number(v) => Ok(MetricValue::Success(v)),
            WireValue::Symbol(s) => match s.as_str() {
                NAN => Ok(MetricValue::Success(f64::NAN)),
                POS_INFINITY => Ok(MetricValue::Success(f64::INFINITY)),
                NEG_INFINITY => Ok(MetricValue::Success(f64::NEG_INFINITY)),
                other => Err(CodecError::Decode(format!(
                    "metric value '{other}' is neither a number nor a failure"
                ))),
            },
            WireValue::Failure { failure } => {
                Ok(MetricValue::Failure(MetricFailure { message: failure }))
            }
        }
    }
}

impl From<&MetricRecord> for WireMetric {
    fn from(record: &MetricRecord) -> Self {
        Self {
            entity: record.entity,
            instance: record.instance.clone(),
            name: record.name.clone(),
            value: WireValue::from(&record.value),
        }
    }
}

impl TryFrom<WireMetric> for MetricRecord {
    type Error = CodecError;

    fn try_from(metric: WireMetric) -> Result<Self, Self::Error> {
        Ok(MetricRecord {
            entity: metric.entity,
            instance: metric.instance,
            name: metric.name,
            value: MetricValue::try_from(metric.value)?,
        })
    }
}

/// Codec for the JSON repository document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocumentCodec {
    pretty: bool,
}

impl JsonDocumentCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent the encoded document.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Parse a bare JSON array of metric records, e.g. the output of an
    /// analysis run exported to a file.
    pub fn decode_metrics(&self, document: &[u8]) -> Result<Vec<MetricRecord>, CodecError> {
        let wire: Vec<WireMetric> =
            serde_json::from_slice(document).map_err(|e| CodecError::Decode(e.to_string()))?;
        wire.into_iter().map(MetricRecord::try_from).collect()
    }

    fn decode_entry(index: usize, wire: WireEntry) -> Result<RepositoryEntry, CodecError> {
        let key = ResultKey::new(wire.result_key.dataset_date, wire.result_key.tags);
        let mut metrics = AnalysisResult::new();

        for metric in wire.metrics {
            let record = MetricRecord::try_from(metric)?;
            if metrics.contains(&record.id()) {
                return Err(CodecError::Decode(format!(
                    "entry {index} ({key}) repeats metric {}",
                    record.id()
                )));
            }
            metrics.insert(record);
        }

        Ok(RepositoryEntry::new(key, metrics))
    }
}

impl DocumentCodec for JsonDocumentCodec {
    fn encode(&self, entries: &[RepositoryEntry]) -> Result<Vec<u8>, CodecError> {
        let wire: Vec<WireEntry> = entries
            .iter()
            .map(|entry| WireEntry {
                result_key: WireResultKey {
                    dataset_date: entry.result_key().dataset_date(),
                    tags: entry.result_key().tags().clone(),
                },
                metrics: entry.metrics().iter().map(WireMetric::from).collect(),
            })
            .collect();

        let encoded = if self.pretty {
            serde_json::to_vec_pretty(&wire)
        } else {
            serde_json::to_vec(&wire)
        };
        encoded.map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode(&self, document: &[u8]) -> Result<Vec<RepositoryEntry>, CodecError> {
        if document.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let wire: Vec<WireEntry> =
            serde_json::from_slice(document).map_err(|e| CodecError::Decode(e.to_string()))?;

        wire.into_iter()
            .enumerate()
            .map(|(index, entry)| Self::decode_entry(index, entry))
            .collect()
    }
}
