//! Asset store: opaque key -> bytes (thumbnails and ZIP archives).

pub mod filesystem;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

pub use filesystem::FilesystemAssetStore;

/// Binary asset store trait
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store content under the given key, replacing any previous value
    async fn put(&self, key: &str, content: Bytes) -> Result<()>;

    /// Retrieve content by key. A missing object is `Ok(None)`, not an
    /// error; callers decide between 404 and a placeholder redirect.
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Delete content by key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Content type inferred from an asset key's extension.
pub fn content_type_for_key(key: &str) -> &'static str {
    if key.ends_with(".zip") {
        "application/zip"
    } else if key.ends_with(".jpg") || key.ends_with(".jpeg") {
        "image/jpeg"
    } else if key.ends_with(".png") {
        "image/png"
    } else {
        "application/octet-stream"
    }
}

/// Whether a missing object under this key should redirect to the image
/// placeholder instead of returning 404.
pub fn is_image_key(key: &str) -> bool {
    key.ends_with(".jpg") || key.ends_with(".jpeg") || key.ends_with(".png")
}
