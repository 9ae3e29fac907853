//! Entity cache error types.

use crate::store::StoreError;

/// Errors from saving or loading a cached collection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CacheError {
    /// The underlying blob store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The collection could not be serialized.
    #[error("failed to encode {key}: {message}")]
    Encode { key: String, message: String },

    /// The stored blob is not a valid collection.
    #[error("failed to decode {key}: {message}")]
    Decode { key: String, message: String },
}

impl CacheError {
    /// True when the blob simply does not exist yet.
    pub fn is_miss(&self) -> bool {
        matches!(self, CacheError::Store(e) if e.is_not_found())
    }
}
