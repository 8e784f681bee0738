use crate::domain::analysis::AnalysisResult;
use crate::domain::errors::DocumentStoreError;
use crate::domain::metric::{AnalyzerId, MetricRecord};
use crate::domain::result_key::{ResultKey, Timestamp};
use crate::domain::tags::Tags;
use crate::ports::outbound::DocumentStore;

pub fn tagged_key(dataset_date: Timestamp, tag: &str) -> ResultKey {
    ResultKey::new(dataset_date, Tags::new().with("tag", tag))
}

pub fn size_result(size: f64) -> AnalysisResult {
    AnalysisResult::new().with(MetricRecord::success(AnalyzerId::dataset("Size"), size))
}

/// Store whose medium is always unreachable.
pub struct UnreachableDocumentStore;

impl DocumentStore for UnreachableDocumentStore {
    fn read_document(&self) -> Result<Option<Vec<u8>>, DocumentStoreError> {
        Err(DocumentStoreError::Io {
            path: "unreachable".to_string(),
            message: "connection refused".to_string(),
        })
    }

    fn write_document_atomically(&mut self, _document: &[u8]) -> Result<(), DocumentStoreError> {
        Err(DocumentStoreError::Io {
            path: "unreachable".to_string(),
            message: "connection refused".to_string(),
        })
    }

    fn describe(&self) -> String {
        "unreachable".to_string()
    }
}
