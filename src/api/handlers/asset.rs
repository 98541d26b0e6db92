//! Asset serving handler.
//!
//! Serves thumbnails and archives by asset-store key. Only keys under the
//! `assets/` namespace are servable; anything else is rejected outright,
//! whether or not such a key exists. This is the one real security
//! boundary in the system.

use axum::{
    body::Body,
    extract::{Query, State},
    http::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::api::SharedState;
use crate::error::{AppError, Result};
use crate::models::ASSET_NAMESPACE;
use crate::storage::{content_type_for_key, is_image_key};

#[derive(Debug, Deserialize)]
pub struct AssetQuery {
    pub key: Option<String>,
}

/// Serve a binary asset by key
pub async fn serve_asset(
    State(state): State<SharedState>,
    Query(query): Query<AssetQuery>,
) -> Result<Response> {
    let key = query
        .key
        .ok_or_else(|| AppError::Validation("Missing key parameter".into()))?;

    if !key.starts_with(ASSET_NAMESPACE) || key.contains("..") {
        return Err(AppError::Authorization(
            "Asset key outside the allowed namespace".into(),
        ));
    }

    let Some(content) = state.assets.get(&key).await? else {
        // Missing thumbnails degrade to a placeholder image instead of a
        // broken grid cell on the public site
        if is_image_key(&key) {
            return Ok(Redirect::temporary(&state.config.placeholder_url).into_response());
        }
        return Err(AppError::NotFound(format!("Asset not found: {}", key)));
    };

    let content_type = content_type_for_key(&key);
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, content.len())
        .header(CACHE_CONTROL, "public, max-age=86400");

    if content_type == "application/zip" {
        let filename = key.rsplit('/').next().unwrap_or(&key);
        builder = builder.header(
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        );
    }

    builder
        .body(Body::from(content))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))
}
