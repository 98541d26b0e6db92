//! Route definitions for the API.

use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};

use super::handlers;
use super::middleware::auth::admin_key_middleware;
use super::SharedState;

/// Create the main API router
pub fn create_router(state: SharedState) -> Router {
    // Admin routes sit behind the shared-secret check. Uploads carry a
    // thumbnail plus a ZIP archive, so the default 2 MB body limit is far
    // too small here.
    let admin_routes = handlers::admin::router()
        .layer(DefaultBodyLimit::max(100 * 1024 * 1024))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_key_middleware,
        ));

    Router::new()
        // Health endpoint (no auth required)
        .route("/health", get(handlers::health::health_check))
        .nest(
            "/api",
            Router::new()
                .route("/vectors", get(handlers::vectors::list_vectors))
                .route("/vectors/:id", get(handlers::vectors::get_vector))
                .route("/categories", get(handlers::vectors::list_categories))
                .route("/asset", get(handlers::asset::serve_asset))
                .route("/download", get(handlers::download::download_vector))
                .nest("/admin", admin_routes),
        )
        .with_state(state)
}
