//! Frevector Backend - Main Entry Point

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use frevector_backend::{
    api::{self, AppState},
    config::Config,
    error::Result,
    storage::FilesystemAssetStore,
    store::FilesystemDocumentStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "frevector_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Starting Frevector backend");

    // Wire up the two stores
    let documents = Arc::new(FilesystemDocumentStore::new(config.data_path.clone()));
    let assets = Arc::new(FilesystemAssetStore::new(config.storage_path.clone()));

    let state = Arc::new(AppState::new(config.clone(), documents, assets));

    // Build router. The public site is served from another origin, so the
    // API stays fully permissive on CORS.
    let app = api::routes::create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = config.bind_address.parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
