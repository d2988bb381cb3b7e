//! Upload size budgets.

use serde::{Deserialize, Serialize};

const MB: u64 = 1024 * 1024;

/// Limits applied by the upload gateway before anything reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum size of a single file in megabytes.
    #[serde(default = "default_max_file_mb")]
    pub max_file_mb: u64,
    /// Maximum combined size of a multi-file upload in megabytes.
    #[serde(default = "default_max_total_mb")]
    pub max_total_mb: u64,
    /// Maximum number of files in a multi-file upload.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl UploadConfig {
    /// Per-file budget in bytes.
    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_mb * MB
    }

    /// Combined multi-upload budget in bytes.
    pub fn max_total_bytes(&self) -> u64 {
        self.max_total_mb * MB
    }

    /// Request body ceiling for the upload routes.
    ///
    /// Leaves one megabyte of headroom for multipart framing.
    pub fn body_limit_bytes(&self) -> usize {
        let payload = self.max_file_bytes().max(self.max_total_bytes());
        usize::try_from(payload + MB).unwrap_or(usize::MAX)
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_mb: default_max_file_mb(),
            max_total_mb: default_max_total_mb(),
            max_files: default_max_files(),
        }
    }
}

fn default_max_file_mb() -> u64 {
    25
}

fn default_max_total_mb() -> u64 {
    50
}

fn default_max_files() -> usize {
    10
}
