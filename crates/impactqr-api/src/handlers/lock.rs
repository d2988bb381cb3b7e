//! Lock and unlock handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use bytes::Bytes;

use impactqr_core::error::{AppError, ErrorKind};
use impactqr_store::{BlobRegistry, LinkError};

use crate::dto::request::{LockQuery, LockRequest};
use crate::dto::response::OkResponse;
use crate::error::ApiResult;
use crate::middleware::cors::X_PASSWORD;
use crate::state::AppState;

/// POST /api/lock/{token}
///
/// Locks with the JSON body `{ "password": "..." }`. With `?unlock=1` it
/// unlocks instead, reading the password from the `x-password` header.
pub async fn lock(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<LockQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<OkResponse>> {
    if query.is_unlock() {
        let password = headers
            .get(X_PASSWORD)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .trim()
            .to_string();
        run_hashing(&state, move |registry| registry.unlock(&token, &password)).await?;
        return Ok(Json(OkResponse::ok()));
    }

    let password = parse_body(&body)?.password().to_string();
    run_hashing(&state, move |registry| registry.lock(&token, &password)).await?;

    Ok(Json(OkResponse::ok()))
}

/// DELETE /api/lock/{token}
pub async fn unlock(
    State(state): State<AppState>,
    Path(token): Path<String>,
    body: Bytes,
) -> ApiResult<Json<OkResponse>> {
    let password = parse_body(&body)?.password().to_string();
    run_hashing(&state, move |registry| registry.unlock(&token, &password)).await?;

    Ok(Json(OkResponse::ok()))
}

/// An absent or blank body reads as an empty request.
fn parse_body(body: &Bytes) -> Result<LockRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(LockRequest::default());
    }
    Ok(serde_json::from_slice(body)?)
}

/// Run a registry operation that hashes or verifies a password off the
/// async workers.
async fn run_hashing<F>(state: &AppState, op: F) -> ApiResult<()>
where
    F: FnOnce(&BlobRegistry) -> Result<(), LinkError> + Send + 'static,
{
    let registry = Arc::clone(&state.registry);
    tokio::task::spawn_blocking(move || op(&registry))
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Password task failed", e))??;
    Ok(())
}
