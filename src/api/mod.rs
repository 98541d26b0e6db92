//! API module - HTTP handlers and middleware.

pub mod handlers;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use crate::catalog::{ActivityLog, CatalogRepository};
use crate::config::Config;
use crate::storage::AssetStore;
use crate::store::DocumentStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub documents: Arc<dyn DocumentStore>,
    pub assets: Arc<dyn AssetStore>,
    pub catalog: CatalogRepository,
    pub activity: ActivityLog,
}

impl AppState {
    pub fn new(
        config: Config,
        documents: Arc<dyn DocumentStore>,
        assets: Arc<dyn AssetStore>,
    ) -> Self {
        Self {
            config,
            catalog: CatalogRepository::new(documents.clone()),
            activity: ActivityLog::new(documents.clone()),
            documents,
            assets,
        }
    }
}

pub type SharedState = Arc<AppState>;
