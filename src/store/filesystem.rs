//! Filesystem document store backend.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::DocumentStore;
use crate::error::{AppError, Result};

/// Filesystem-based document store. Each document is one JSON file under
/// the base directory.
pub struct FilesystemDocumentStore {
    base_path: PathBuf,
}

impl FilesystemDocumentStore {
    /// Create new filesystem document store
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn key_to_path(&self, key: &str) -> Result<PathBuf> {
        // Document keys are flat identifiers, never paths
        if key.is_empty() || key.contains('/') || key.contains("..") {
            return Err(AppError::Store(format!("Invalid document key: {}", key)));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl DocumentStore for FilesystemDocumentStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let path = self.key_to_path(key)?;
        match fs::read(&path).await {
            Ok(content) => Ok(Some(Bytes::from(content))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Store(format!("Failed to read {}: {}", key, e))),
        }
    }

    async fn put(&self, key: &str, content: Bytes) -> Result<()> {
        let path = self.key_to_path(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&path).await?;
        file.write_all(&content).await?;
        file.sync_all().await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.key_to_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Store(format!("Failed to delete {}: {}", key, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FilesystemDocumentStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FilesystemDocumentStore::new(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_put_get() {
        let (store, _temp) = create_test_store();

        let content = Bytes::from(r#"{"vectors":[]}"#);
        store.put("all_vectors", content.clone()).await.unwrap();

        let retrieved = store.get("all_vectors").await.unwrap();
        assert_eq!(retrieved, Some(content));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let (store, _temp) = create_test_store();
        assert_eq!(store.get("all_vectors").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let (store, _temp) = create_test_store();
        store.delete("settings").await.unwrap();
    }

    #[tokio::test]
    async fn test_path_like_key_rejected() {
        let (store, _temp) = create_test_store();
        assert!(store.get("../etc/passwd").await.is_err());
    }
}
