use crate::domain::errors::DocumentStoreError;
use crate::ports::outbound::{DocumentStore, UpdateGuard};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "locking")]
use crate::adapters::lock::DocumentLock;

/// Single-document store on a local or mounted filesystem.
///
/// Writes go to `<path>.tmp`, are synced, then renamed over `path`, so a
/// crash mid-write leaves the previous document readable.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    path: PathBuf,
    lock_writes: bool,
}

impl FileDocumentStore {
    /// Store at `path` with write locking enabled.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        match fs::metadata(&path) {
            Ok(metadata) => tracing::info!(
                path = %path.display(),
                bytes = metadata.len(),
                "Found existing metrics document"
            ),
            Err(_) => tracing::info!(
                path = %path.display(),
                "No metrics document yet, it will be created on first save"
            ),
        }

        Self {
            path,
            lock_writes: true,
        }
    }

    pub fn with_lock_writes(mut self, lock_writes: bool) -> Self {
        self.lock_writes = lock_writes;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, err: std::io::Error) -> DocumentStoreError {
        DocumentStoreError::Io {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// Flush the directory entry so the rename survives a power loss.
    #[cfg(unix)]
    fn sync_parent_dir(&self) -> std::io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::File::open(parent)?.sync_all(),
            _ => fs::File::open(".")?.sync_all(),
        }
    }

    #[cfg(not(unix))]
    fn sync_parent_dir(&self) -> std::io::Result<()> {
        Ok(())
    }

    fn ensure_parent_dir(&self) -> Result<(), DocumentStoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| DocumentStoreError::PathMissing {
                    path: format!("{} ({})", parent.display(), e),
                })
            }
            _ => Ok(()),
        }
    }
}

impl DocumentStore for FileDocumentStore {
    fn read_document(&self) -> Result<Option<Vec<u8>>, DocumentStoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write_document_atomically(&mut self, document: &[u8]) -> Result<(), DocumentStoreError> {
        self.ensure_parent_dir()?;

        let temp_path = self.temp_path();
        let written = fs::File::create(&temp_path).and_then(|mut file| {
            file.write_all(document)?;
            file.sync_all()
        });

        let result = written.and_then(|_| fs::rename(&temp_path, &self.path));
        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path);
            return Err(self.io_error(e));
        }
        self.sync_parent_dir().map_err(|e| self.io_error(e))?;

        tracing::debug!(
            path = %self.path.display(),
            bytes = document.len(),
            "Metrics document replaced"
        );
        Ok(())
    }

    fn lock_for_update(&self) -> Result<UpdateGuard, DocumentStoreError> {
        if !self.lock_writes {
            return Ok(UpdateGuard::unlocked());
        }

        self.ensure_parent_dir()?;
        acquire_write_lock(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(feature = "locking")]
fn acquire_write_lock(path: &Path) -> Result<UpdateGuard, DocumentStoreError> {
    Ok(UpdateGuard::holding(DocumentLock::acquire(path)?))
}

#[cfg(not(feature = "locking"))]
fn acquire_write_lock(_path: &Path) -> Result<UpdateGuard, DocumentStoreError> {
    Ok(UpdateGuard::unlocked())
}
