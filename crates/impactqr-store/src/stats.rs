//! Process-lifetime upload and download statistics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counters bumped by the registry on create and consume.
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    uploads: AtomicU64,
    downloads: AtomicU64,
    bytes_uploaded: AtomicU64,
}

impl StatsCounters {
    pub(crate) fn record_upload(&self, size_bytes: u64) {
        self.uploads.fetch_add(1, Ordering::Relaxed);
        self.bytes_uploaded.fetch_add(size_bytes, Ordering::Relaxed);
    }

    pub(crate) fn record_download(&self) {
        self.downloads.fetch_add(1, Ordering::Relaxed);
    }

    /// Combine the counters with a freshly computed live-link count.
    pub(crate) fn snapshot(&self, active_links: u64) -> LinkStats {
        let total_uploads = self.uploads.load(Ordering::Relaxed);
        let bytes = self.bytes_uploaded.load(Ordering::Relaxed);

        LinkStats {
            total_uploads,
            total_downloads: self.downloads.load(Ordering::Relaxed),
            avg_size: average(bytes, total_uploads),
            active_links,
        }
    }
}

/// Rounded mean upload size; zero before the first upload.
fn average(bytes: u64, uploads: u64) -> u64 {
    if uploads == 0 {
        return 0;
    }
    (bytes + uploads / 2) / uploads
}

/// Aggregate statistics exposed on `/api/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkStats {
    /// Links ever created.
    pub total_uploads: u64,
    /// Downloads ever served.
    pub total_downloads: u64,
    /// Mean payload size in bytes, rounded.
    pub avg_size: u64,
    /// Links that are currently downloadable.
    pub active_links: u64,
}
