//! Persistent blob storage.
//!
//! The device keeps its cached collections as opaque named blobs in a small
//! key-value store with an explicit commit step, like a flash NVS
//! partition. Absence of a key is an ordinary outcome
//! ([`StoreError::NotFound`]), not a failure of the store.

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

/// Longest key the store accepts (the flash key-value limit).
pub const MAX_KEY_LEN: usize = 15;

/// Named-blob storage with an explicit durability commit.
///
/// Writes become visible to reads immediately but only survive a restart
/// once [`commit`](BlobStore::commit) returns `Ok`.
pub trait BlobStore {
    /// Exact size in bytes of the blob stored under `key`.
    fn blob_len(&self, key: &str) -> Result<usize, StoreError>;

    /// Copy the blob into `buf`, returning the number of bytes written.
    ///
    /// `buf` must be at least [`blob_len`](BlobStore::blob_len) bytes long.
    fn read_blob(&self, key: &str, buf: &mut [u8]) -> Result<usize, StoreError>;

    /// Stage a blob under `key`, replacing any previous value.
    fn write_blob(&mut self, key: &str, data: &[u8]) -> Result<(), StoreError>;

    /// Make every staged write durable.
    fn commit(&mut self) -> Result<(), StoreError>;

    /// Remove every blob, staged or committed.
    fn erase_all(&mut self) -> Result<(), StoreError>;
}

/// Check a key against the store's naming rules.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid_chars = key
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');

    if key.is_empty() || key.len() > MAX_KEY_LEN || !valid_chars {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(())
}
