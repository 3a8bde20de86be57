use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::fs;

/// Flat directory of blobs keyed by file id.
#[derive(Clone, Debug)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Open `root`, creating it if needed.
    pub async fn open(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    pub async fn write(&self, id: &str, data: &[u8]) -> std::io::Result<()> {
        fs::write(self.path(id), data).await
    }

    /// `None` when the blob does not exist.
    pub async fn read(&self, id: &str) -> std::io::Result<Option<Bytes>> {
        match fs::read(self.path(id)).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Removing a missing blob is not an error.
    pub async fn remove(&self, id: &str) -> std::io::Result<()> {
        match fs::remove_file(self.path(id)).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_read_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::open(dir.path().join("nested")).await.unwrap();

        store.write("a", b"hello").await.unwrap();
        assert_eq!(store.read("a").await.unwrap(), Some(Bytes::from_static(b"hello")));

        store.remove("a").await.unwrap();
        assert_eq!(store.read("a").await.unwrap(), None);
        store.remove("a").await.unwrap();
    }
}
