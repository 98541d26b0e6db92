//! Category record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored category record (admin-managed). Per-category counts are always
/// derived from the vector collection, never read from these records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Derived per-category aggregate for listings and the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: u64,
    pub downloads: u64,
}
