//! Route definitions for the ImpactQR HTTP API.
//!
//! JSON endpoints live under `/api`; `/d/{token}` is the public download
//! link encoded in the QR code.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with every route, threaded with `state`.
///
/// Middleware is applied by [`build_app`](crate::app::build_app).
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.uploads.body_limit_bytes();

    let api_routes = Router::new()
        .merge(upload_routes(body_limit))
        .merge(link_routes())
        .merge(lock_routes())
        .route("/stats", get(handlers::stats::stats));

    Router::new()
        .route("/", get(handlers::health::service_info))
        .route("/__ping", get(handlers::health::ping))
        .route("/d/{token}", get(handlers::download::download))
        .nest("/api", api_routes)
        .with_state(state)
}

/// Upload endpoints, with the body limit raised to the upload budget.
fn upload_routes(body_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/upload", post(handlers::upload::upload_single))
        .route("/upload-multi", post(handlers::upload::upload_multi))
        .layer(DefaultBodyLimit::max(body_limit))
}

/// Read-only link probes
fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/exists/{token}", get(handlers::link::exists))
        .route("/file/{token}", get(handlers::link::file_info))
}

/// Lock, unlock, and the header-based unlock fallback
fn lock_routes() -> Router<AppState> {
    Router::new().route(
        "/lock/{token}",
        post(handlers::lock::lock).delete(handlers::lock::unlock),
    )
}
