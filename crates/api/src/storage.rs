//! Blob storage for uploaded files.
//!
//! Handlers and services talk to [`BlobStore`]; the server wires in
//! [`LocalBlobStore`], which keeps every blob as a flat file under the
//! configured upload directory.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncRead;

/// An opened blob ready to be streamed.
pub struct BlobReader {
    pub reader: Box<dyn AsyncRead + Send + Unpin>,
    /// Size in bytes.
    pub len: u64,
}

/// Named, flat blob storage.
///
/// Names are expected to be sanitised already; implementations reject
/// anything that could escape the store.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn exists(&self, name: &str) -> io::Result<bool>;

    /// Write `data` under `name`, replacing any existing blob.
    async fn put(&self, name: &str, data: &[u8]) -> io::Result<()>;

    async fn remove(&self, name: &str) -> io::Result<()>;

    async fn open(&self, name: &str) -> io::Result<BlobReader>;
}

/// Blob store backed by a local directory.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, name: &str) -> io::Result<PathBuf> {
        if name.is_empty()
            || name.contains(['/', '\\'])
            || name == "."
            || name == ".."
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid blob name '{name}'"),
            ));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn exists(&self, name: &str) -> io::Result<bool> {
        tokio::fs::try_exists(self.path_for(name)?).await
    }

    async fn put(&self, name: &str, data: &[u8]) -> io::Result<()> {
        let path = self.path_for(name)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, data).await?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "Stored blob");
        Ok(())
    }

    async fn remove(&self, name: &str) -> io::Result<()> {
        tokio::fs::remove_file(self.path_for(name)?).await
    }

    async fn open(&self, name: &str) -> io::Result<BlobReader> {
        let file = tokio::fs::File::open(self.path_for(name)?).await?;
        let len = file.metadata().await?.len();
        Ok(BlobReader {
            reader: Box::new(file),
            len,
        })
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::AsyncReadExt;

    use super::*;

    #[tokio::test]
    async fn put_open_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().join("uploads"));

        assert!(!store.exists("lecture.mp3").await.unwrap());
        store.put("lecture.mp3", b"ID3 audio").await.unwrap();
        assert!(store.exists("lecture.mp3").await.unwrap());

        let mut blob = store.open("lecture.mp3").await.unwrap();
        assert_eq!(blob.len, 9);
        let mut contents = Vec::new();
        blob.reader.read_to_end(&mut contents).await.unwrap();
        assert_eq!(contents, b"ID3 audio");

        store.remove("lecture.mp3").await.unwrap();
        assert!(!store.exists("lecture.mp3").await.unwrap());
    }

    #[tokio::test]
    async fn put_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());
        store.put("a.mp3", b"first").await.unwrap();
        store.put("a.mp3", b"second").await.unwrap();
        assert_eq!(store.open("a.mp3").await.unwrap().len, 6);
    }

    #[tokio::test]
    async fn rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());
        for name in ["../escape.mp3", "nested/a.mp3", "..", ""] {
            let err = store.put(name, b"x").await.unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{name}");
        }
    }
}
