//! Public catalog handlers: vector listings and category counts.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::SharedState;
use crate::catalog::repository::paginate;
use crate::catalog::ListFilter;
use crate::error::{AppError, Result};
use crate::models::{Vector, PAGE_SIZE};

#[derive(Debug, Deserialize)]
pub struct ListVectorsQuery {
    /// Exact category filter
    pub category: Option<String>,
    /// Search terms, AND semantics across whitespace-separated terms
    pub q: Option<String>,
    /// Keep entries uploaded within the last N days
    pub days: Option<i64>,
    /// 1-based page; when absent the full filtered set is returned
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct VectorListResponse {
    pub vectors: Vec<Vector>,
}

#[derive(Debug, Serialize)]
pub struct PublicCategoryCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<PublicCategoryCount>,
    pub total: u64,
}

/// List vectors, optionally filtered and paginated server-side. Without a
/// `page` parameter the full filtered set is returned so clients can page
/// locally; nothing is ever silently truncated.
pub async fn list_vectors(
    State(state): State<SharedState>,
    Query(query): Query<ListVectorsQuery>,
) -> Result<Json<VectorListResponse>> {
    let filter = ListFilter {
        category: query.category,
        search: query.q,
        days: query.days,
    };
    let filtered = state.catalog.list(&filter).await?;

    let vectors = match query.page {
        Some(page) => paginate(&filtered, page, PAGE_SIZE).to_vec(),
        None => filtered,
    };

    Ok(Json(VectorListResponse { vectors }))
}

/// Get a single vector by id
pub async fn get_vector(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Vector>> {
    state
        .catalog
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Vector not found: {}", id)))
}

/// Category names with vector counts, derived from the collection and
/// sorted A-Z.
pub async fn list_categories(
    State(state): State<SharedState>,
) -> Result<Json<CategoryListResponse>> {
    let counts = state.catalog.category_counts().await?;
    let total = counts.iter().map(|c| c.count).sum();

    Ok(Json(CategoryListResponse {
        categories: counts
            .into_iter()
            .map(|c| PublicCategoryCount {
                name: c.name,
                count: c.count,
            })
            .collect(),
        total,
    }))
}
