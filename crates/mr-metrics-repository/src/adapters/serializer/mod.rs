//! Serializer Adapters
//!
//! Implementations of the `DocumentCodec` trait.

mod json;

pub use self::json::JsonDocumentCodec;
