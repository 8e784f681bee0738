//! # Document Write Lock
//!
//! Serializes writers that share one repository document across processes.
//!
//! Every save rewrites the whole document, so two unsynchronized writers
//! would lose each other's entries. The lock is held for exactly one
//! read-modify-write cycle and never across operations.
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on Windows).


use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::domain::errors::DocumentStoreError;

/// Exclusive lock on `<document>.lock`.
///
/// Acquisition never blocks: contention fails immediately with
/// `DocumentStoreError::Locked`. Released on drop.
pub struct DocumentLock {
    /// Kept open to maintain the lock
    file: File,
    path: PathBuf,
    pid: u32,
}

impl DocumentLock {
    /// Path of the lock file guarding `document`.
    pub fn lock_path_for(document: &Path) -> PathBuf {
        let mut name = document
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        document.with_file_name(name)
    }

    /// Acquire the write lock for `document`.
    ///
    /// # Errors
    ///
    /// - `Locked` if another writer holds it
    /// - `Io` if the lock file cannot be created or written
    pub fn acquire(document: &Path) -> Result<Self, DocumentStoreError> {
        let path = Self::lock_path_for(document);
        let io_err = |e: std::io::Error| DocumentStoreError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        // Not truncated before locking: the holder's PID must survive a failed attempt.
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(io_err)?;

        if file.try_lock_exclusive().is_err() {
            let holder = Self::read_holder_pid(&path);
            tracing::warn!(
                lock = %path.display(),
                holder_pid = ?holder,
                "Metrics document is locked by another writer"
            );
            return Err(DocumentStoreError::Locked {
                path: path.display().to_string(),
            });
        }

        let pid = std::process::id();
        file.set_len(0).map_err(io_err)?;
        writeln!(file, "{}", pid).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        Ok(Self { file, path, pid })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_holder_pid(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        // The lock file stays on disk; removing it would race with a writer
        // that has opened it but not locked it yet.
        #[allow(clippy::incompatible_msrv)]
        let _ = self.file.unlock();
    }
}
