//! Response DTOs.
//!
//! Field names are camelCase and timestamps are epoch milliseconds, which is
//! what the browser client expects.

use serde::Serialize;

use impactqr_store::{LinkInfo, LinkStats};

/// Bare `{ ok }` response.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OkResponse {
    /// Outcome.
    pub ok: bool,
}

impl OkResponse {
    /// `{ "ok": true }`
    pub const fn ok() -> Self {
        Self { ok: true }
    }
}

/// Service banner for `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfoResponse {
    /// Always `true`.
    pub ok: bool,
    /// Service name.
    pub service: String,
}

/// Returned by both upload routes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Always `true`.
    pub ok: bool,
    /// Link token.
    pub token: String,
    /// Download filename.
    pub filename: String,
    /// Stored size in bytes.
    pub size: u64,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
    /// Relative download URL.
    pub url: String,
    /// Download limit, `null` when unlimited.
    pub max_downloads: Option<u64>,
}

impl From<LinkInfo> for UploadResponse {
    fn from(info: LinkInfo) -> Self {
        Self {
            ok: true,
            url: info.token.download_path(),
            token: info.token.to_string(),
            filename: info.display_name,
            size: info.size_bytes,
            created_at: info.created_at.timestamp_millis(),
            max_downloads: info.download_limit,
        }
    }
}

/// Link metadata for `GET /api/file/{token}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkInfoResponse {
    /// Always `true`.
    pub ok: bool,
    /// Link token.
    pub token: String,
    /// Download filename.
    pub filename: String,
    /// Stored size in bytes.
    pub size: u64,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
    /// Expiry time in epoch milliseconds, `null` without a TTL.
    pub expires_at: Option<i64>,
    /// Successful downloads so far.
    pub downloads: u64,
    /// Download limit, `null` when unlimited.
    pub max_downloads: Option<u64>,
    /// Whether the link is permanently dead.
    pub expired: bool,
    /// Whether the link is password-locked.
    pub locked: bool,
}

impl From<LinkInfo> for LinkInfoResponse {
    fn from(info: LinkInfo) -> Self {
        Self {
            ok: true,
            token: info.token.to_string(),
            filename: info.display_name,
            size: info.size_bytes,
            created_at: info.created_at.timestamp_millis(),
            expires_at: info.expires_at.map(|at| at.timestamp_millis()),
            downloads: info.download_count,
            max_downloads: info.download_limit,
            expired: info.terminal,
            locked: info.locked,
        }
    }
}

/// Aggregate counters for `GET /api/stats`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Links ever created.
    pub total_uploads: u64,
    /// Downloads ever served.
    pub total_downloads: u64,
    /// Mean upload size in bytes.
    pub avg_size: u64,
    /// Links downloadable right now.
    pub active_links: u64,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            total_uploads: stats.total_uploads,
            total_downloads: stats.total_downloads,
            avg_size: stats.avg_size,
            active_links: stats.active_links,
        }
    }
}
