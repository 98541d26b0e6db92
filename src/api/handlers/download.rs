//! Download handler: serve an archive and count the download.

use axum::{
    body::Body,
    extract::{Query, State},
    http::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE},
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;

use crate::api::SharedState;
use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub slug: Option<String>,
}

/// Serve a vector's ZIP archive and increment its download counter.
///
/// The increment is fire-and-forget: it runs on a spawned task so the
/// response is never blocked on the counter write, and a lost increment
/// (crash or concurrent write) is accepted.
pub async fn download_vector(
    State(state): State<SharedState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response> {
    let slug = query
        .slug
        .ok_or_else(|| AppError::Validation("Missing slug parameter".into()))?;

    let vector = state
        .catalog
        .get(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vector not found: {}", slug)))?;

    let archive_key = vector.archive_key();
    let content = state
        .assets
        .get(&archive_key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Archive not found: {}", archive_key)))?;

    let catalog = state.catalog.clone();
    let id = vector.id.clone();
    tokio::spawn(async move {
        match catalog.increment_downloads(&id).await {
            Ok(true) => {}
            Ok(false) => tracing::warn!(%id, "Download counted for vector that vanished"),
            Err(e) => tracing::warn!(error = %e, %id, "Failed to increment download counter"),
        }
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/zip")
        .header(CONTENT_LENGTH, content.len())
        .header(CACHE_CONTROL, "no-store")
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{}.zip\"", vector.id),
        )
        .body(Body::from(content))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))
}
