//! Usage statistics handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::StatsResponse;
use crate::state::AppState;

/// GET /api/stats
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.registry.stats().into())
}
