//! Filesystem asset store backend.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::AssetStore;
use crate::error::{AppError, Result};

/// Filesystem-based asset store. Slashes in keys map to subdirectories,
/// so `assets/Food/food-42.zip` lands under `<base>/assets/Food/`.
pub struct FilesystemAssetStore {
    base_path: PathBuf,
}

impl FilesystemAssetStore {
    /// Create new filesystem asset store
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn key_to_path(&self, key: &str) -> Result<PathBuf> {
        // Keys must stay inside the base directory
        if key.is_empty()
            || key.starts_with('/')
            || key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..")
        {
            return Err(AppError::Store(format!("Invalid asset key: {}", key)));
        }
        Ok(self.base_path.join(key))
    }
}

#[async_trait]
impl AssetStore for FilesystemAssetStore {
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

    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let path = self.key_to_path(key)?;
        match fs::read(&path).await {
            Ok(content) => Ok(Some(Bytes::from(content))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Store(format!("Failed to read {}: {}", key, e))),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.key_to_path(key)?;
        Ok(path.exists())
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

    fn create_test_store() -> (FilesystemAssetStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FilesystemAssetStore::new(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_put_get_nested_key() {
        let (store, _temp) = create_test_store();

        let content = Bytes::from_static(b"zip bytes");
        store
            .put("assets/Food/food-42.zip", content.clone())
            .await
            .unwrap();

        let retrieved = store.get("assets/Food/food-42.zip").await.unwrap();
        assert_eq!(retrieved, Some(content));
        assert!(store.exists("assets/Food/food-42.zip").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let (store, _temp) = create_test_store();
        assert_eq!(store.get("assets/Food/nope.zip").await.unwrap(), None);
        assert!(!store.exists("assets/Food/nope.zip").await.unwrap());
    }

    #[tokio::test]
    async fn test_traversal_key_rejected() {
        let (store, _temp) = create_test_store();
        assert!(store.get("assets/../secrets").await.is_err());
        assert!(store.put("/etc/passwd", Bytes::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (store, _temp) = create_test_store();
        store
            .put("assets/Icon/a.jpg", Bytes::from_static(b"x"))
            .await
            .unwrap();
        store.delete("assets/Icon/a.jpg").await.unwrap();
        store.delete("assets/Icon/a.jpg").await.unwrap();
        assert!(!store.exists("assets/Icon/a.jpg").await.unwrap());
    }
}
