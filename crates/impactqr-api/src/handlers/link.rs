//! Link probing handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::response::{LinkInfoResponse, OkResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/exists/{token}
///
/// Always 200; `ok` says whether a download would be served right now.
/// Never counts as a download. A stale link may be marked expired.
pub async fn exists(State(state): State<AppState>, Path(token): Path<String>) -> Json<OkResponse> {
    Json(OkResponse {
        ok: state.registry.is_available(&token),
    })
}

/// GET /api/file/{token}
pub async fn file_info(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<Json<LinkInfoResponse>> {
    let info = state.registry.get(&token)?;
    Ok(Json(info.into()))
}
