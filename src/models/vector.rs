//! Vector catalog entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ASSET_NAMESPACE;

/// One catalog entry: a downloadable graphic and its metadata.
///
/// `id` is the sole primary key. Older metadata files written by the admin
/// panel used `name` for the same field, so it is accepted as an alias on
/// deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vector {
    #[serde(alias = "name")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub category: String,

    #[serde(default)]
    pub keywords: Vec<String>,

    /// Display string only, not authoritative
    #[serde(rename = "fileSize", default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,

    /// Direct thumbnail URL override. When absent the thumbnail is served
    /// from the derived asset key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(rename = "uploadDate")]
    pub upload_date: DateTime<Utc>,

    #[serde(default)]
    pub downloads: u64,
}

impl Vector {
    /// Asset store key of the JPEG thumbnail.
    pub fn thumbnail_key(&self) -> String {
        format!("{}{}/{}.jpg", ASSET_NAMESPACE, self.category, self.id)
    }

    /// Asset store key of the downloadable ZIP archive.
    pub fn archive_key(&self) -> String {
        format!("{}{}/{}.zip", ASSET_NAMESPACE, self.category, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_accepted_as_id_alias() {
        let v: Vector = serde_json::from_str(
            r#"{"name":"food-42","category":"Food","uploadDate":"2026-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        assert_eq!(v.id, "food-42");
        assert_eq!(v.downloads, 0);
        assert!(v.keywords.is_empty());
    }

    #[test]
    fn asset_keys_are_derived_from_category_and_id() {
        let v: Vector = serde_json::from_str(
            r#"{"id":"food-42","category":"Food","uploadDate":"2026-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        assert_eq!(v.thumbnail_key(), "assets/Food/food-42.jpg");
        assert_eq!(v.archive_key(), "assets/Food/food-42.zip");
    }
}
