use crate::domain::errors::DocumentStoreError;
use crate::ports::outbound::DocumentStore;

/// Process-local document store.
///
/// Saves only mutate process memory; contents are lost when the store drops.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDocumentStore {
    document: Option<Vec<u8>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an existing document.
    pub fn with_document(document: impl Into<Vec<u8>>) -> Self {
        Self {
            document: Some(document.into()),
        }
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn read_document(&self) -> Result<Option<Vec<u8>>, DocumentStoreError> {
        Ok(self.document.clone())
    }

    fn write_document_atomically(&mut self, document: &[u8]) -> Result<(), DocumentStoreError> {
        self.document = Some(document.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
