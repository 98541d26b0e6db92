//! Activity log entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One admin activity entry. The log is append-only and capped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub action: String,
    pub timestamp: DateTime<Utc>,
}
