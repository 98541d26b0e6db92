//! Admin authentication middleware.
//!
//! Every admin operation requires the shared admin secret, supplied either
//! as `X-Admin-Key: <key>` or `Authorization: Bearer <key>`, compared by
//! exact equality against the configured value. A mismatch is rejected
//! before the handler runs, so no side effect can precede the check.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderName},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::SharedState;
use crate::error::AppError;

/// Custom header carrying the admin secret
static X_ADMIN_KEY: HeaderName = HeaderName::from_static("x-admin-key");

/// Extract the presented admin credential, if any.
fn extract_key(request: &Request) -> Option<&str> {
    if let Some(value) = request.headers().get(&X_ADMIN_KEY) {
        return value.to_str().ok();
    }
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Reject requests that do not carry the configured admin key.
pub async fn admin_key_middleware(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    match extract_key(&request) {
        Some(key) if key == state.config.admin_key => next.run(request).await,
        Some(_) => AppError::Authentication("Invalid admin key".into()).into_response(),
        None => AppError::Authentication("Missing admin key".into()).into_response(),
    }
}
