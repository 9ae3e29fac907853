//! Directory-backed blob store.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{BlobStore, StoreError, validate_key};

/// File extension for committed blobs.
const BLOB_EXT: &str = "blob";

/// [`BlobStore`] that keeps one file per key inside a directory.
///
/// Writes are staged in memory; [`commit`](BlobStore::commit) writes each
/// staged blob to a temporary file and renames it into place, so a crash
/// mid-commit never leaves a half-written blob behind.
#[derive(Debug)]
pub struct FileBlobStore {
    dir: PathBuf,
    staged: BTreeMap<String, Vec<u8>>,
}

impl FileBlobStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            staged: BTreeMap::new(),
        })
    }

    /// Directory holding the blob files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{BLOB_EXT}"))
    }

    fn not_found(key: &str) -> StoreError {
        StoreError::NotFound {
            key: key.to_string(),
        }
    }

    fn read_file(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        match fs::read(self.blob_path(key)) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Self::not_found(key)),
            Err(e) => Err(e.into()),
        }
    }
}

impl BlobStore for FileBlobStore {
    fn blob_len(&self, key: &str) -> Result<usize, StoreError> {
        validate_key(key)?;
        if let Some(data) = self.staged.get(key) {
            return Ok(data.len());
        }
        match fs::metadata(self.blob_path(key)) {
            Ok(meta) => Ok(meta.len() as usize),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Self::not_found(key)),
            Err(e) => Err(e.into()),
        }
    }

    fn read_blob(&self, key: &str, buf: &mut [u8]) -> Result<usize, StoreError> {
        validate_key(key)?;
        let owned;
        let data = match self.staged.get(key) {
            Some(data) => data.as_slice(),
            None => {
                owned = self.read_file(key)?;
                owned.as_slice()
            }
        };
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
        self.staged.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        while let Some((key, data)) = self.staged.pop_first() {
            let path = self.blob_path(&key);
            let tmp = path.with_extension("tmp");
            let written = fs::write(&tmp, &data).and_then(|()| fs::rename(&tmp, &path));
            if let Err(e) = written {
                // Keep the blob staged so a later commit can retry it.
                self.staged.insert(key, data);
                return Err(e.into());
            }
            debug!(key = %key, bytes = data.len(), "committed blob");
        }
        Ok(())
    }

    fn erase_all(&mut self) -> Result<(), StoreError> {
        self.staged.clear();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_blob = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == BLOB_EXT || ext == "tmp");
            if path.is_file() && is_blob {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn read_all(store: &FileBlobStore, key: &str) -> Vec<u8> {
        let len = store.blob_len(key).unwrap();
        let mut buf = vec![0u8; len];
        let n = store.read_blob(key, &mut buf).unwrap();
        buf.truncate(n);
        buf
    }

    #[test]
    fn missing_blob_is_not_found() {
        let dir = tempdir().unwrap();
        let store = FileBlobStore::open(dir.path()).unwrap();
        assert!(store.blob_len("routes").unwrap_err().is_not_found());
        let mut buf = [0u8; 4];
        assert!(store.read_blob("routes", &mut buf).unwrap_err().is_not_found());
    }

    #[test]
    fn committed_blobs_survive_reopen() {
        let dir = tempdir().unwrap();
        {
            let mut store = FileBlobStore::open(dir.path()).unwrap();
            store.write_blob("routes", b"[{\"a\":1}]").unwrap();
            store.commit().unwrap();
        }
        let store = FileBlobStore::open(dir.path()).unwrap();
        assert_eq!(read_all(&store, "routes"), b"[{\"a\":1}]");
        assert!(dir.path().join("routes.blob").exists());
    }

    #[test]
    fn staged_blobs_are_readable_but_not_durable() {
        let dir = tempdir().unwrap();
        {
            let mut store = FileBlobStore::open(dir.path()).unwrap();
            store.write_blob("stations", b"[]").unwrap();
            assert_eq!(read_all(&store, "stations"), b"[]");
        }
        let store = FileBlobStore::open(dir.path()).unwrap();
        assert!(store.blob_len("stations").unwrap_err().is_not_found());
    }

    #[test]
    fn rewrite_replaces_previous_value() {
        let dir = tempdir().unwrap();
        let mut store = FileBlobStore::open(dir.path()).unwrap();
        store.write_blob("trips_5", b"first").unwrap();
        store.commit().unwrap();
        store.write_blob("trips_5", b"second!").unwrap();
        store.commit().unwrap();
        assert_eq!(store.blob_len("trips_5").unwrap(), 7);
        assert_eq!(read_all(&store, "trips_5"), b"second!");
    }

    #[test]
    fn erase_all_only_touches_blobs() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

        let mut store = FileBlobStore::open(dir.path()).unwrap();
        store.write_blob("routes", b"1").unwrap();
        store.write_blob("trips_1", b"2").unwrap();
        store.commit().unwrap();
        store.write_blob("stations", b"3").unwrap();

        store.erase_all().unwrap();

        assert!(store.blob_len("routes").unwrap_err().is_not_found());
        assert!(store.blob_len("trips_1").unwrap_err().is_not_found());
        assert!(store.blob_len("stations").unwrap_err().is_not_found());
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested").join("cache");
        let mut store = FileBlobStore::open(&nested).unwrap();
        store.write_blob("routes", b"x").unwrap();
        store.commit().unwrap();
        assert!(nested.join("routes.blob").exists());
        assert_eq!(store.dir(), nested.as_path());
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let mut store = FileBlobStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.write_blob("../escape", b"x"),
            Err(StoreError::InvalidKey { .. })
        ));
    }
}
