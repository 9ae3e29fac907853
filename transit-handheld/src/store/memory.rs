//! In-memory blob store.

use std::collections::BTreeMap;

use super::{BlobStore, StoreError, validate_key};

/// Volatile [`BlobStore`] with the same staged/committed split as flash.
///
/// Used by tests and by the simulator when no data directory is wanted.
/// Failures can be injected to exercise the store-error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    committed: BTreeMap<String, Vec<u8>>,
    staged: BTreeMap<String, Vec<u8>>,
    fail_reads: bool,
    fail_writes: bool,
    commits: usize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail with an I/O error.
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every subsequent write and commit fail with an I/O error.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Drop staged writes, as a power cut before commit would.
    pub fn discard_uncommitted(&mut self) {
        self.staged.clear();
    }

    /// Keys visible to readers, in order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .committed
            .keys()
            .chain(self.staged.keys())
            .cloned()
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Number of successful commits so far.
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    /// Raw access to a blob, bypassing the size/read protocol.
    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.lookup(key)
    }

    fn lookup(&self, key: &str) -> Option<&[u8]> {
        self.staged
            .get(key)
            .or_else(|| self.committed.get(key))
            .map(Vec::as_slice)
    }

    fn io_error(op: &str) -> StoreError {
        StoreError::Io {
            message: format!("injected {op} failure"),
        }
    }
}

impl BlobStore for MemoryBlobStore {
    fn blob_len(&self, key: &str) -> Result<usize, StoreError> {
        validate_key(key)?;
        if self.fail_reads {
            return Err(Self::io_error("read"));
        }
        self.lookup(key)
            .map(<[u8]>::len)
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })
    }

    fn read_blob(&self, key: &str, buf: &mut [u8]) -> Result<usize, StoreError> {
        validate_key(key)?;
        if self.fail_reads {
            return Err(Self::io_error("read"));
        }
        let data = self.lookup(key).ok_or_else(|| StoreError::NotFound {
            key: key.to_string(),
        })?;
        if buf.len() < data.len() {
            return Err(StoreError::BufferTooSmall {
                key: key.to_string(),
                needed: data.len(),
            });
        }
        buf[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    fn write_blob(&mut self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        validate_key(key)?;
        if self.fail_writes {
            return Err(Self::io_error("write"));
        }
        self.staged.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(Self::io_error("commit"));
        }
        self.committed.append(&mut self.staged);
        self.commits += 1;
        Ok(())
    }

    fn erase_all(&mut self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(Self::io_error("erase"));
        }
        self.committed.clear();
        self.staged.clear();
        Ok(())
    }
}
