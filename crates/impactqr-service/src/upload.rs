//! Upload service for single-file and bundled multi-file uploads.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::info;

use impactqr_core::config::UploadConfig;
use impactqr_core::error::{AppError, ErrorKind};
use impactqr_store::{BlobRegistry, LinkInfo, NewLink};

use crate::bundle;

const MB: f64 = 1024.0 * 1024.0;

/// Fallback display name for parts sent without a filename.
const DEFAULT_FILE_NAME: &str = "file";

/// One file part received from a client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied filename.
    pub name: String,
    /// File contents.
    pub data: Bytes,
}

impl UploadedFile {
    /// Size in bytes.
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    /// Whether the part carried no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Validates uploads against the configured budgets and stores them.
#[derive(Clone)]
pub struct UploadService {
    /// Link store.
    registry: Arc<BlobRegistry>,
    /// Size and count budgets.
    limits: UploadConfig,
    /// TTL applied to every new link.
    ttl: Option<Duration>,
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService")
            .field("limits", &self.limits)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl UploadService {
    /// Create a new upload service.
    pub fn new(registry: Arc<BlobRegistry>, limits: UploadConfig, ttl: Option<Duration>) -> Self {
        Self {
            registry,
            limits,
            ttl,
        }
    }

    /// Configured budgets.
    pub fn limits(&self) -> &UploadConfig {
        &self.limits
    }

    /// Store a single file as a new link.
    pub fn upload_single(
        &self,
        file: UploadedFile,
        download_limit: Option<u64>,
    ) -> Result<LinkInfo, AppError> {
        if file.is_empty() {
            return Err(AppError::validation("No file"));
        }
        self.check_file_size(&file)?;

        let display_name = match file.name.trim() {
            "" => DEFAULT_FILE_NAME.to_string(),
            name => name.to_string(),
        };

        let info = self.registry.create(NewLink {
            payload: file.data,
            display_name,
            download_limit,
            ttl: self.ttl,
        });

        info!(
            token = %info.token,
            size = info.size_bytes,
            "Single file uploaded"
        );

        Ok(info)
    }

    /// Bundle several files into one ZIP and store it as a new link.
    ///
    /// The archive is named `impactqr-{token}.zip` after the token it is
    /// stored under.
    pub async fn upload_multi(
        &self,
        files: Vec<UploadedFile>,
        download_limit: Option<u64>,
    ) -> Result<LinkInfo, AppError> {
        let files: Vec<UploadedFile> = files.into_iter().filter(|f| !f.is_empty()).collect();

        if files.is_empty() {
            return Err(AppError::validation("No files"));
        }
        if files.len() > self.limits.max_files {
            return Err(AppError::size_exceeded(format!(
                "Too many files. Maximum {} files per upload.",
                self.limits.max_files
            )));
        }
        for file in &files {
            self.check_file_size(file)?;
        }

        let total: u64 = files.iter().map(UploadedFile::len).sum();
        if total > self.limits.max_total_bytes() {
            return Err(AppError::size_exceeded(format!(
                "Total upload too large ({:.1} MB). Maximum {} MB combined.",
                total as f64 / MB,
                self.limits.max_total_mb
            )));
        }

        let file_count = files.len();
        let archive = tokio::task::spawn_blocking(move || bundle::zip_files(&files))
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Archive task failed", e)
            })??;

        let ttl = self.ttl;
        let info = self.registry.create_with(|token| NewLink {
            payload: archive,
            display_name: format!("impactqr-{token}.zip"),
            download_limit,
            ttl,
        });

        info!(
            token = %info.token,
            files = file_count,
            input_bytes = total,
            archive_bytes = info.size_bytes,
            "Multi-file bundle uploaded"
        );

        Ok(info)
    }

    fn check_file_size(&self, file: &UploadedFile) -> Result<(), AppError> {
        if file.len() > self.limits.max_file_bytes() {
            return Err(AppError::size_exceeded(format!(
                "File too large. Maximum {} MB per file.",
                self.limits.max_file_mb
            )));
        }
        Ok(())
    }
}

/// Interpret a client-supplied download limit.
///
/// Blank, non-numeric and non-positive values mean unlimited. Fractional
/// values round up.
pub fn parse_download_limit(raw: Option<&str>) -> Option<u64> {
    let value: f64 = raw?.trim().parse().ok()?;
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    Some(value.ceil() as u64)
}
