//! Capped admin activity log.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;

use crate::error::Result;
use crate::models::{ActivityEntry, ACTIVITY_DISPLAY_LIMIT, ACTIVITY_LOG_CAP};
use crate::store::{DocumentStore, ACTIVITY_KEY};

/// Append-only activity log stored as one capped JSON array.
#[derive(Clone)]
pub struct ActivityLog {
    store: Arc<dyn DocumentStore>,
}

impl ActivityLog {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn load(&self) -> Result<Vec<ActivityEntry>> {
        match self.store.get(ACTIVITY_KEY).await? {
            // A damaged log is not worth failing an upload over; start fresh
            Some(raw) => Ok(serde_json::from_slice(&raw).unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    /// Append an entry, trimming the log to the newest entries. Failures
    /// are logged and swallowed so the calling operation never fails on
    /// bookkeeping.
    pub async fn record(&self, action: impl Into<String>) {
        let action = action.into();
        if let Err(e) = self.try_record(&action).await {
            tracing::warn!(error = %e, %action, "Failed to record activity");
        }
    }

    async fn try_record(&self, action: &str) -> Result<()> {
        let mut entries = self.load().await?;
        entries.push(ActivityEntry {
            action: action.to_string(),
            timestamp: Utc::now(),
        });
        if entries.len() > ACTIVITY_LOG_CAP {
            let excess = entries.len() - ACTIVITY_LOG_CAP;
            entries.drain(..excess);
        }
        let raw = serde_json::to_vec(&entries)?;
        self.store.put(ACTIVITY_KEY, Bytes::from(raw)).await
    }

    /// The newest entries, most recent last, capped for display.
    pub async fn recent(&self) -> Result<Vec<ActivityEntry>> {
        let entries = self.load().await?;
        let skip = entries.len().saturating_sub(ACTIVITY_DISPLAY_LIMIT);
        Ok(entries.into_iter().skip(skip).collect())
    }
}
