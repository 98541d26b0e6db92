//! Admin handlers: upload, delete, listing, stats, activity, category
//! records and settings.
//!
//! All routes here sit behind the admin-key middleware; handlers can
//! assume the caller is authenticated.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::api::SharedState;
use crate::error::{AppError, Result};
use crate::models::{is_valid_category, Category, Vector};
use crate::store::{CATEGORIES_KEY, SETTINGS_KEY};

/// Create admin routes
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/",
            get(admin_get).post(upload_vector).delete(delete_vector),
        )
        .route("/categories", get(list_categories).post(add_category))
        .route("/categories/:id", axum::routing::delete(delete_category))
        .route("/settings", post(save_settings))
}

#[derive(Debug, Deserialize)]
pub struct AdminGetQuery {
    pub action: Option<String>,
}

/// Dispatch on the `action` query parameter: plain GET lists the full
/// collection, `stats` returns dashboard aggregates, `activity` the
/// recent activity log.
pub async fn admin_get(
    State(state): State<SharedState>,
    Query(query): Query<AdminGetQuery>,
) -> Result<Response> {
    match query.action.as_deref() {
        None | Some("") => {
            let vectors = state.catalog.load().await?;
            Ok(Json(json!({ "vectors": vectors })).into_response())
        }
        Some("stats") => {
            let stats = state.catalog.stats().await?;
            Ok(Json(stats).into_response())
        }
        Some("activity") => {
            let activities = state.activity.recent().await?;
            Ok(Json(json!({ "activities": activities })).into_response())
        }
        Some(other) => Err(AppError::Validation(format!("Unknown action: {}", other))),
    }
}

/// Metadata carried by the `json` part of an upload. `name` is accepted
/// as an alias for `id` for metadata files written for the old panel.
#[derive(Debug, Deserialize)]
struct UploadMetadata {
    #[serde(alias = "name")]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    category: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(rename = "fileSize", default)]
    file_size: Option<String>,
}

/// Upload a new vector: multipart with `json` (metadata), `jpeg`
/// (thumbnail) and `zip` (archive) parts.
///
/// Both blobs are written to the asset store before the metadata upsert,
/// so the catalog never points at assets that failed to land.
pub async fn upload_vector(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Response> {
    let mut json_part: Option<Bytes> = None;
    let mut jpeg_part: Option<Bytes> = None;
    let mut zip_part: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart request: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid file part: {}", e)))?;
        match name.as_str() {
            "json" => json_part = Some(content),
            "jpeg" => jpeg_part = Some(content),
            "zip" => zip_part = Some(content),
            _ => {}
        }
    }

    let (json_raw, jpeg_raw, zip_raw) = match (json_part, jpeg_part, zip_part) {
        (Some(json), Some(jpeg), Some(zip)) => (json, jpeg, zip),
        (json, jpeg, zip) => {
            let mut missing = Vec::new();
            if json.is_none() {
                missing.push("json");
            }
            if jpeg.is_none() {
                missing.push("jpeg");
            }
            if zip.is_none() {
                missing.push("zip");
            }
            return Err(AppError::Validation(format!(
                "Missing required file parts: {}",
                missing.join(", ")
            )));
        }
    };

    let metadata: UploadMetadata = serde_json::from_slice(&json_raw)
        .map_err(|e| AppError::Validation(format!("Invalid metadata JSON: {}", e)))?;

    if metadata.id.trim().is_empty() {
        return Err(AppError::Validation(
            "Metadata must contain a non-empty \"name\" or \"id\" field".into(),
        ));
    }
    if !is_valid_category(&metadata.category) {
        return Err(AppError::Validation(format!(
            "Unknown category: {}",
            metadata.category
        )));
    }

    if state.catalog.get(&metadata.id).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Vector already exists: {}",
            metadata.id
        )));
    }

    let vector = Vector {
        id: metadata.id,
        title: metadata.title,
        description: metadata.description,
        category: metadata.category,
        keywords: metadata.keywords,
        file_size: metadata.file_size,
        thumbnail: None,
        upload_date: Utc::now(),
        downloads: 0,
    };

    // Blobs first, metadata second
    state.assets.put(&vector.thumbnail_key(), jpeg_raw).await?;
    state.assets.put(&vector.archive_key(), zip_raw).await?;

    let created = state.catalog.upsert(vector).await?;
    state
        .activity
        .record(format!("Vector uploaded: {}", created.id))
        .await;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "vector": created })),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct DeleteVectorQuery {
    pub slug: Option<String>,
}

/// Delete a vector and, best-effort, its two asset objects.
pub async fn delete_vector(
    State(state): State<SharedState>,
    Query(query): Query<DeleteVectorQuery>,
) -> Result<Json<serde_json::Value>> {
    let slug = query
        .slug
        .ok_or_else(|| AppError::Validation("Missing slug parameter".into()))?;

    let vector = state
        .catalog
        .get(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vector not found: {}", slug)))?;

    state.catalog.remove(&slug).await?;

    // Asset cleanup is best-effort: a missing or unreachable blob must not
    // fail the delete once the metadata is gone
    for key in [vector.thumbnail_key(), vector.archive_key()] {
        if let Err(e) = state.assets.delete(&key).await {
            tracing::warn!(error = %e, %key, "Failed to delete asset during vector removal");
        }
    }

    state
        .activity
        .record(format!("Vector deleted: {}", slug))
        .await;

    Ok(Json(json!({ "success": true })))
}

async fn load_categories(state: &SharedState) -> Result<Vec<Category>> {
    match state.documents.get(CATEGORIES_KEY).await? {
        Some(raw) => serde_json::from_slice(&raw)
            .map_err(|e| AppError::Store(format!("Malformed category list: {}", e))),
        None => Ok(Vec::new()),
    }
}

async fn save_categories(state: &SharedState, categories: &[Category]) -> Result<()> {
    let raw = serde_json::to_vec(categories)?;
    state.documents.put(CATEGORIES_KEY, Bytes::from(raw)).await
}

/// List stored category records
pub async fn list_categories(
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>> {
    let categories = load_categories(&state).await?;
    Ok(Json(json!({ "categories": categories })))
}

#[derive(Debug, Deserialize)]
pub struct AddCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Create a category record
pub async fn add_category(
    State(state): State<SharedState>,
    Json(request): Json<AddCategoryRequest>,
) -> Result<Response> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Category name is required".into()));
    }

    let category = Category {
        id: format!("category-{}", Utc::now().timestamp_millis()),
        name: request.name,
        description: request.description,
        created_at: Utc::now(),
    };

    let mut categories = load_categories(&state).await?;
    categories.push(category.clone());
    save_categories(&state, &categories).await?;

    state
        .activity
        .record(format!("Category added: {}", category.name))
        .await;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "category": category })),
    )
        .into_response())
}

/// Delete a category record by id
pub async fn delete_category(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let mut categories = load_categories(&state).await?;
    let before = categories.len();
    categories.retain(|c| c.id != id);

    if categories.len() == before {
        return Err(AppError::NotFound(format!("Category not found: {}", id)));
    }
    save_categories(&state, &categories).await?;

    state
        .activity
        .record(format!("Category deleted: {}", id))
        .await;

    Ok(Json(json!({ "success": true })))
}

/// Store the settings document verbatim
pub async fn save_settings(
    State(state): State<SharedState>,
    Json(settings): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>> {
    let raw = serde_json::to_vec(&settings)?;
    state.documents.put(SETTINGS_KEY, Bytes::from(raw)).await?;

    state.activity.record("Settings updated").await;

    Ok(Json(json!({ "success": true })))
}
