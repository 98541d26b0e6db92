//! Catalog document store: opaque key -> JSON document.

pub mod filesystem;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

pub use filesystem::FilesystemDocumentStore;

/// Key of the document holding the entire vector collection
pub const VECTORS_KEY: &str = "all_vectors";

/// Key of the document holding admin-managed category records
pub const CATEGORIES_KEY: &str = "all_categories";

/// Key of the capped activity log document
pub const ACTIVITY_KEY: &str = "activity_log";

/// Key of the free-form settings document
pub const SETTINGS_KEY: &str = "settings";

/// Key-value document store trait
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Retrieve a document by key. A missing document is `Ok(None)`,
    /// not an error.
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Store a document under the given key, replacing any previous value
    async fn put(&self, key: &str, content: Bytes) -> Result<()>;

    /// Delete a document by key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
