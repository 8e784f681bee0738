//! # Adapters Module
//!
//! Adapter implementations for the metrics repository ports.
//!
//! ## Modules
//!
//! - `storage`: Backing media (`InMemoryDocumentStore`, `FileDocumentStore`)
//! - `serializer`: JSON document codec
//! - `lock`: Cross-process write lock (feature `locking`)

#[cfg(feature = "locking")]
pub mod lock;
pub mod serializer;
pub mod storage;

#[cfg(feature = "locking")]
pub use lock::DocumentLock;
pub use serializer::JsonDocumentCodec;
pub use storage::{FileDocumentStore, InMemoryDocumentStore};
