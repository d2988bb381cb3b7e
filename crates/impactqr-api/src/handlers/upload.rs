//! Upload handlers for single files and multi-file ZIP bundles.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;

use impactqr_core::error::AppError;
use impactqr_service::{UploadedFile, parse_download_limit};

use crate::dto::response::UploadResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// Multipart fields relevant to an upload.
#[derive(Debug, Default)]
struct UploadForm {
    files: Vec<UploadedFile>,
    max_downloads: Option<String>,
}

/// POST /api/upload: multipart field `file`, optional `maxDownloads`
pub async fn upload_single(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let form = read_form(&mut multipart, "file", 1).await?;
    let file = form
        .files
        .into_iter()
        .next()
        .ok_or_else(|| AppError::validation("No file"))?;

    let limit = parse_download_limit(form.max_downloads.as_deref());
    let info = state.upload_service.upload_single(file, limit)?;

    Ok(Json(info.into()))
}

/// POST /api/upload-multi: repeated multipart field `files`, optional `maxDownloads`
pub async fn upload_multi(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let max_files = state.upload_service.limits().max_files;
    let form = read_form(&mut multipart, "files", max_files).await?;

    let limit = parse_download_limit(form.max_downloads.as_deref());
    let info = state.upload_service.upload_multi(form.files, limit).await?;

    Ok(Json(info.into()))
}

/// Collect up to `max_files` non-empty parts named `file_field` plus
/// `maxDownloads`.
///
/// Empty file parts and other fields are skipped.
async fn read_form(
    multipart: &mut Multipart,
    file_field: &str,
    max_files: usize,
) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "maxDownloads" => {
                form.max_downloads = Some(field.text().await.map_err(multipart_error)?);
            }
            n if n == file_field => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                if data.is_empty() {
                    continue;
                }
                if form.files.len() >= max_files {
                    return Err(AppError::size_exceeded(format!(
                        "Too many files. Maximum {max_files} files per upload."
                    )));
                }
                form.files.push(UploadedFile {
                    name: file_name,
                    data,
                });
            }
            _ => {}
        }
    }

    Ok(form)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::size_exceeded(format!("Upload too large: {}", err.body_text()))
    } else {
        AppError::validation(format!("Upload error: {}", err.body_text()))
    }
}
