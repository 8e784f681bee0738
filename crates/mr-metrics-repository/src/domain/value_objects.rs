//! # Value Objects
//!
//! Repository configuration.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Where the repository document lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Backend {
    /// Process-local; lost when the process exits.
    Memory,
    /// A single JSON document on a local or mounted filesystem.
    File { path: PathBuf },
}

/// Configuration for a metrics repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Backing medium (default: in-memory).
    pub backend: Backend,

    /// Take an exclusive `<path>.lock` for each save (file backend only, default: true).
    ///
    /// The store rewrites the whole document on every save, so concurrent
    /// writers from several processes must be serialized.
    pub lock_writes: bool,

    /// Indent the persisted JSON document (default: false).
    pub pretty_json: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Memory,
            lock_writes: true,
            pretty_json: false,
        }
    }
}

impl RepositoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// File-backed configuration at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::default().with_backend(Backend::File { path: path.into() })
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_lock_writes(mut self, lock_writes: bool) -> Self {
        self.lock_writes = lock_writes;
        self
    }

    pub fn with_pretty_json(mut self, pretty_json: bool) -> Self {
        self.pretty_json = pretty_json;
        self
    }

    /// Build configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MR_REPOSITORY_PATH`: file backend at this path (default: in-memory)
    /// - `MR_LOCK_WRITES`: lock each save (default: true)
    /// - `MR_PRETTY_JSON`: indent the document (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            backend: env::var("MR_REPOSITORY_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(|path| Backend::File { path: path.into() })
                .unwrap_or(defaults.backend),

            lock_writes: env::var("MR_LOCK_WRITES")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.lock_writes),

            pretty_json: env::var("MR_PRETTY_JSON")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.pretty_json),
        }
    }
}
