//! # Metrics Repository Service
//!
//! The application service implementing `MetricsRepositoryApi`.
//!
//! ## Architecture
//!
//! The service holds no entries of its own. Every operation goes back to
//! the backing medium:
//!
//! - save: lock → read → decode → merge-or-append → encode → atomic write
//! - load: read → decode → query builder over the snapshot
//!
//! so several processes sharing one document always see each other's saves,
//! and the medium is only held for the duration of a single operation.


use crate::adapters::{FileDocumentStore, InMemoryDocumentStore, JsonDocumentCodec};
use crate::domain::analysis::AnalysisResult;
use crate::domain::entry::{self, RepositoryEntry, SaveOutcome};
use crate::domain::errors::RepositoryError;
use crate::domain::query::MetricsRepositoryQuery;
use crate::domain::result_key::ResultKey;
use crate::domain::value_objects::{Backend, RepositoryConfig};
use crate::metrics;
use crate::ports::inbound::MetricsRepositoryApi;
use crate::ports::outbound::{DocumentCodec, DocumentStore};
use std::path::Path;
use std::time::Instant;

/// The metrics repository service.
pub struct MetricsRepositoryService<DS, DC>
where
    DS: DocumentStore,
    DC: DocumentCodec,
{
    /// Backing medium.
    pub(crate) store: DS,
    /// Document encoding.
    pub(crate) codec: DC,
}

/// Dependencies for MetricsRepositoryService
pub struct MetricsRepositoryDependencies<DS, DC> {
    pub store: DS,
    pub codec: DC,
}

/// Repository whose medium is chosen at runtime from a `RepositoryConfig`.
pub type ConfiguredMetricsRepository =
    MetricsRepositoryService<Box<dyn DocumentStore>, JsonDocumentCodec>;

impl<DS, DC> MetricsRepositoryService<DS, DC>
where
    DS: DocumentStore,
    DC: DocumentCodec,
{
    pub fn new(deps: MetricsRepositoryDependencies<DS, DC>) -> Self {
        Self {
            store: deps.store,
            codec: deps.codec,
        }
    }

    pub fn store(&self) -> &DS {
        &self.store
    }

    fn read_entries(&self) -> Result<Vec<RepositoryEntry>, RepositoryError> {
        match self.store.read_document()? {
            Some(document) => Ok(self.codec.decode(&document)?),
            None => Ok(Vec::new()),
        }
    }

    fn apply_save(
        &mut self,
        key: ResultKey,
        result: AnalysisResult,
    ) -> Result<(SaveOutcome, usize), RepositoryError> {
        let _guard = self.store.lock_for_update()?;

        let mut entries = self.read_entries()?;
        let outcome = entry::save_or_append(&mut entries, key, result);
        let document = self.codec.encode(&entries)?;
        self.store.write_document_atomically(&document)?;

        Ok((outcome, entries.len()))
    }
}

impl MetricsRepositoryService<InMemoryDocumentStore, JsonDocumentCodec> {
    /// Process-local repository.
    pub fn in_memory() -> Self {
        Self::new(MetricsRepositoryDependencies {
            store: InMemoryDocumentStore::new(),
            codec: JsonDocumentCodec::new(),
        })
    }
}

impl MetricsRepositoryService<FileDocumentStore, JsonDocumentCodec> {
    /// Repository persisted as a JSON document at `path`.
    pub fn file_backed<P: AsRef<Path>>(path: P) -> Self {
        Self::new(MetricsRepositoryDependencies {
            store: FileDocumentStore::new(path),
            codec: JsonDocumentCodec::new(),
        })
    }
}

impl ConfiguredMetricsRepository {
    pub fn from_config(config: &RepositoryConfig) -> Self {
        let store: Box<dyn DocumentStore> = match &config.backend {
            Backend::Memory => Box::new(InMemoryDocumentStore::new()),
            Backend::File { path } => {
                Box::new(FileDocumentStore::new(path).with_lock_writes(config.lock_writes))
            }
        };
        let codec = if config.pretty_json {
            JsonDocumentCodec::pretty()
        } else {
            JsonDocumentCodec::new()
        };

        Self::new(MetricsRepositoryDependencies { store, codec })
    }
}

impl<DS, DC> MetricsRepositoryApi for MetricsRepositoryService<DS, DC>
where
    DS: DocumentStore,
    DC: DocumentCodec,
{
    fn save_or_append(
        &mut self,
        key: ResultKey,
        result: AnalysisResult,
    ) -> Result<(), RepositoryError> {
        let started = Instant::now();
        let dataset_date = key.dataset_date();
        let tags = key.tags().to_string();
        let metric_count = result.len();

        match self.apply_save(key, result) {
            Ok((outcome, total)) => {
                metrics::record_save("ok", started.elapsed().as_secs_f64());
                metrics::set_entries(total);
                let (action, index) = match outcome {
                    SaveOutcome::Appended(i) => ("appended", i),
                    SaveOutcome::Merged(i) => ("merged", i),
                };
                tracing::info!(
                    store = %self.store.describe(),
                    dataset_date,
                    tags = %tags,
                    metrics = metric_count,
                    action,
                    index,
                    entries = total,
                    "Saved analysis result"
                );
                Ok(())
            }
            Err(err) => {
                metrics::record_save(err.kind(), started.elapsed().as_secs_f64());
                tracing::warn!(
                    store = %self.store.describe(),
                    dataset_date,
                    tags = %tags,
                    error = %err,
                    "Failed to save analysis result"
                );
                Err(err)
            }
        }
    }

    fn load(&self) -> Result<MetricsRepositoryQuery, RepositoryError> {
        match self.read_entries() {
            Ok(entries) => {
                metrics::record_load("ok");
                tracing::debug!(
                    store = %self.store.describe(),
                    entries = entries.len(),
                    "Loaded metrics repository"
                );
                Ok(MetricsRepositoryQuery::new(entries))
            }
            Err(err) => {
                metrics::record_load(err.kind());
                tracing::warn!(
                    store = %self.store.describe(),
                    error = %err,
                    "Failed to load metrics repository"
                );
                Err(err)
            }
        }
    }
}
