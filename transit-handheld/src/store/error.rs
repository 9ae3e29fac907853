//! Blob store error types.

/// Errors returned by a [`BlobStore`](super::BlobStore).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No blob is stored under this key.
    #[error("no blob stored under {key:?}")]
    NotFound { key: String },

    /// The key is empty, too long, or contains unsupported characters.
    #[error("invalid store key {key:?}")]
    InvalidKey { key: String },

    /// The read buffer is smaller than the stored blob.
    #[error("buffer too small for {key:?}: need {needed} bytes")]
    BufferTooSmall { key: String, needed: usize },

    /// The backing medium failed.
    #[error("storage I/O error: {message}")]
    Io { message: String },
}

impl StoreError {
    /// True for the expected "nothing cached yet" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io {
            message: err.to_string(),
        }
    }
}
