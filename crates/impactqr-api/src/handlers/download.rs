//! Download handler for `/d/{token}`.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};

use impactqr_core::error::AppError;
use impactqr_store::{ConsumedLink, LinkError};

use crate::error::{ApiError, ApiResult};
use crate::pages;
use crate::state::AppState;

/// GET /d/{token}
///
/// Serves the payload as an attachment, or an HTML page explaining why it
/// cannot be served.
pub async fn download(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<Response> {
    match state.registry.consume(&token) {
        Ok(link) => attachment(link),
        Err(LinkError::NotFound) => Ok(html(StatusCode::NOT_FOUND, pages::not_found_page())),
        Err(LinkError::Locked { display_name }) => Ok(html(
            StatusCode::UNAUTHORIZED,
            pages::locked_page(&token, &display_name),
        )),
        Err(LinkError::Expired {
            display_name,
            downloads,
            limit,
        }) => Ok(html(
            StatusCode::GONE,
            pages::expired_page(&token, &display_name, downloads, limit),
        )),
        Err(other) => Err(ApiError::from(other)),
    }
}

fn attachment(link: ConsumedLink) -> ApiResult<Response> {
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                pages::sanitize_filename(&link.display_name)
            ),
        )
        .header(header::CACHE_CONTROL, "no-store")
        .header(header::CONTENT_LENGTH, link.payload.len())
        .body(Body::from(link.payload))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

fn html(status: StatusCode, page: String) -> Response {
    (status, [(header::CACHE_CONTROL, "no-store")], Html(page)).into_response()
}
