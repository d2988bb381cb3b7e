//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use impactqr_core::error::{AppError, ErrorKind};
use impactqr_store::LinkError;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub ok: bool,
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type returned by JSON handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<LinkError> for ApiError {
    fn from(err: LinkError) -> Self {
        Self(err.into())
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::SizeExceeded => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Locked => StatusCode::UNAUTHORIZED,
        ErrorKind::Expired => StatusCode::GONE,
        ErrorKind::WrongSecret => StatusCode::FORBIDDEN,
        ErrorKind::Internal | ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<&AppError> for ApiErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            ok: false,
            error: err.kind.to_string(),
            message: err.message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.kind.is_unexpected() {
            match &err.source {
                Some(source) => {
                    tracing::error!(error = %err.message, source = %source, "Internal server error")
                }
                None => tracing::error!(error = %err.message, "Internal server error"),
            }
        } else {
            tracing::debug!(kind = %err.kind, error = %err.message, "Request rejected");
        }

        (status_for(err.kind), Json(ApiErrorResponse::from(&err))).into_response()
    }
}
