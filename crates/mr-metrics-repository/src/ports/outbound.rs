//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the repository service.
//!
//! The store reads and rewrites one whole document per operation, so the
//! medium only has to offer `read_document` and `write_document_atomically`.
//! Each medium (memory, local disk, mounted distributed filesystem) is one
//! implementation; the service never branches on the medium.

use crate::domain::entry::RepositoryEntry;
use crate::domain::errors::{CodecError, DocumentStoreError};
use std::any::Any;

/// Backing medium holding the serialized repository document.
pub trait DocumentStore: Send + Sync {
    /// Read the whole document. `None` if nothing has been written yet.
    fn read_document(&self) -> Result<Option<Vec<u8>>, DocumentStoreError>;

    /// Replace the whole document.
    ///
    /// ## Atomicity
    ///
    /// A failed write must leave the previous document intact; readers see
    /// either the old or the new document, never a truncated one.
    fn write_document_atomically(&mut self, document: &[u8]) -> Result<(), DocumentStoreError>;

    /// Exclusive access for one read-modify-write cycle.
    ///
    /// Access is released when the guard drops. The default grants it
    /// unconditionally, which is correct for process-local media.
    fn lock_for_update(&self) -> Result<UpdateGuard, DocumentStoreError> {
        Ok(UpdateGuard::unlocked())
    }

    /// Human-readable location for log lines.
    fn describe(&self) -> String;
}

impl<T: DocumentStore + ?Sized> DocumentStore for Box<T> {
    fn read_document(&self) -> Result<Option<Vec<u8>>, DocumentStoreError> {
        (**self).read_document()
    }

    fn write_document_atomically(&mut self, document: &[u8]) -> Result<(), DocumentStoreError> {
        (**self).write_document_atomically(document)
    }

    fn lock_for_update(&self) -> Result<UpdateGuard, DocumentStoreError> {
        (**self).lock_for_update()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// RAII handle returned by `DocumentStore::lock_for_update`.
pub struct UpdateGuard {
    _held: Option<Box<dyn Any + Send>>,
}

impl UpdateGuard {
    /// Guard that holds nothing.
    pub fn unlocked() -> Self {
        Self { _held: None }
    }

    /// Guard that keeps `resource` alive until dropped.
    pub fn holding<R: Any + Send>(resource: R) -> Self {
        Self {
            _held: Some(Box::new(resource)),
        }
    }

    pub fn is_holding(&self) -> bool {
        self._held.is_some()
    }
}

/// Converts the entry log to and from the persisted document.
pub trait DocumentCodec: Send + Sync {
    fn encode(&self, entries: &[RepositoryEntry]) -> Result<Vec<u8>, CodecError>;

    /// Parse a whole document.
    ///
    /// ## Fail Closed
    ///
    /// Any malformed element fails the whole decode; records are never
    /// silently dropped.
    fn decode(&self, document: &[u8]) -> Result<Vec<RepositoryEntry>, CodecError>;
}
