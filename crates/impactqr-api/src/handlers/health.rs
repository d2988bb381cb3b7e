//! Liveness handlers.

use axum::Json;

use crate::dto::response::{OkResponse, ServiceInfoResponse};

/// Name reported by `GET /`.
pub const SERVICE_NAME: &str = "ImpactQR API (in-memory)";

/// GET /
pub async fn service_info() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        ok: true,
        service: SERVICE_NAME.to_string(),
    })
}

/// GET /__ping
pub async fn ping() -> Json<OkResponse> {
    Json(OkResponse::ok())
}
