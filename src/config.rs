//! Application configuration loaded from environment variables.

use crate::error::{AppError, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (host:port)
    pub bind_address: String,

    /// Log level
    pub log_level: String,

    /// Directory holding the catalog documents (vector list, categories,
    /// activity log, settings)
    pub data_path: String,

    /// Directory holding binary assets (thumbnails, ZIP archives)
    pub storage_path: String,

    /// Shared admin secret, compared by exact equality against the
    /// X-Admin-Key header
    pub admin_key: String,

    /// Redirect target for missing thumbnail images
    pub placeholder_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            data_path: env::var("DATA_PATH")
                .unwrap_or_else(|_| "/var/lib/frevector/catalog".into()),
            storage_path: env::var("STORAGE_PATH")
                .unwrap_or_else(|_| "/var/lib/frevector/assets".into()),
            admin_key: env::var("ADMIN_KEY")
                .map_err(|_| AppError::Config("ADMIN_KEY not set".into()))?,
            placeholder_url: env::var("PLACEHOLDER_URL").unwrap_or_else(|_| {
                "https://placehold.co/400x300/f5f5f5/999999?text=Preview".into()
            }),
        })
    }
}
