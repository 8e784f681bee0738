//! # Domain Errors
//!
//! Error types for the metrics repository.
//!
//! Only persistence failures are errors. A metric whose computation failed is
//! ordinary data (`MetricValue::Failure`) and never aborts a save.

use thiserror::Error;

/// Errors surfaced by repository operations.
///
/// Neither variant is retried by the repository; retry policy belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The backing medium could not be read or written.
    ///
    /// `contended` is set when another writer held the document lock; the
    /// medium itself is healthy and the save may be attempted again.
    #[error("Metrics store unavailable: {message}")]
    StoreUnavailable { message: String, contended: bool },

    /// The persisted document could not be parsed.
    #[error("Metrics store corrupt: {message}")]
    CorruptStore { message: String },
}

impl RepositoryError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        RepositoryError::StoreUnavailable {
            message: message.into(),
            contended: false,
        }
    }

    /// True only when a save lost the race for the write lock.
    pub fn is_lock_contention(&self) -> bool {
        matches!(
            self,
            RepositoryError::StoreUnavailable {
                contended: true,
                ..
            }
        )
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        RepositoryError::CorruptStore {
            message: message.into(),
        }
    }

    /// Short label used for log fields and metric outcomes.
    pub fn kind(&self) -> &'static str {
        match self {
            RepositoryError::StoreUnavailable { .. } => "store_unavailable",
            RepositoryError::CorruptStore { .. } => "corrupt_store",
        }
    }
}

/// Errors raised by a `DocumentStore` adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentStoreError {
    /// I/O error while reading or writing the document.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Another process holds the write lock.
    #[error("Document locked by another writer ({path})")]
    Locked { path: String },

    /// The document location cannot be created.
    #[error("Document location missing: {path}")]
    PathMissing { path: String },
}

impl From<DocumentStoreError> for RepositoryError {
    fn from(err: DocumentStoreError) -> Self {
        RepositoryError::StoreUnavailable {
            contended: matches!(err, DocumentStoreError::Locked { .. }),
            message: err.to_string(),
        }
    }
}

/// Errors raised by a `DocumentCodec` adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Entries could not be rendered to bytes.
    #[error("Failed to encode metrics document: {0}")]
    Encode(String),

    /// Bytes do not form a valid metrics document.
    #[error("Failed to decode metrics document: {0}")]
    Decode(String),
}

impl From<CodecError> for RepositoryError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Encode(_) => RepositoryError::unavailable(err.to_string()),
            CodecError::Decode(_) => RepositoryError::CorruptStore {
                message: err.to_string(),
            },
        }
    }
}
