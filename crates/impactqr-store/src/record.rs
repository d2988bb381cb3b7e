//! Link records and the liveness rules that govern them.

use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use impactqr_core::LinkToken;

use crate::secret::LockSecret;

/// Input for [`BlobRegistry::create`](crate::BlobRegistry::create).
#[derive(Debug, Clone)]
pub struct NewLink {
    /// The stored bytes (a single file or a ZIP bundle).
    pub payload: Bytes,
    /// Filename shown to clients and sent on download.
    pub display_name: String,
    /// Maximum successful downloads. `None` or `Some(0)` means unlimited.
    pub download_limit: Option<u64>,
    /// Time-to-live from creation. `None` means no time-based expiry.
    pub ttl: Option<Duration>,
}

/// Client-visible state of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// Downloadable right now.
    Available,
    /// Waiting for the owner to unlock it.
    Locked,
    /// Out of time or downloads; will never be served again.
    Expired,
}

/// A stored link. Lives inside the registry table only.
#[derive(Debug)]
pub(crate) struct LinkRecord {
    pub(crate) token: LinkToken,
    pub(crate) payload: Bytes,
    pub(crate) display_name: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) expires_at: Option<DateTime<Utc>>,
    pub(crate) download_count: u64,
    pub(crate) download_limit: Option<u64>,
    pub(crate) terminal: bool,
    pub(crate) lock: Option<LockSecret>,
}

impl LinkRecord {
    pub(crate) fn new(token: LinkToken, link: NewLink, now: DateTime<Utc>) -> Self {
        let expires_at = link
            .ttl
            .and_then(|ttl| chrono::Duration::from_std(ttl).ok())
            .and_then(|ttl| now.checked_add_signed(ttl));

        Self {
            token,
            payload: link.payload,
            display_name: link.display_name,
            created_at: now,
            expires_at,
            download_count: 0,
            download_limit: link.download_limit.filter(|limit| *limit > 0),
            terminal: false,
            lock: None,
        }
    }

    pub(crate) fn size_bytes(&self) -> u64 {
        self.payload.len() as u64
    }

    pub(crate) fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    pub(crate) fn ttl_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now > at)
    }

    pub(crate) fn limit_reached(&self) -> bool {
        self.download_limit
            .is_some_and(|limit| self.download_count >= limit)
    }

    /// Whether no further download can ever succeed. Does not mutate.
    pub(crate) fn is_dead(&self, now: DateTime<Utc>) -> bool {
        self.terminal || self.ttl_expired(now) || self.limit_reached()
    }

    /// Read-only availability check used by stats.
    pub(crate) fn is_available(&self, now: DateTime<Utc>) -> bool {
        !self.is_locked() && !self.is_dead(now)
    }

    /// Latch `terminal` if the record has gone stale. Returns the new value.
    pub(crate) fn refresh(&mut self, now: DateTime<Utc>) -> bool {
        if !self.terminal && self.is_dead(now) {
            self.terminal = true;
        }
        self.terminal
    }

    pub(crate) fn status(&self) -> LinkStatus {
        if self.is_locked() {
            LinkStatus::Locked
        } else if self.terminal {
            LinkStatus::Expired
        } else {
            LinkStatus::Available
        }
    }

    pub(crate) fn info(&self) -> LinkInfo {
        LinkInfo {
            token: self.token.clone(),
            display_name: self.display_name.clone(),
            size_bytes: self.size_bytes(),
            created_at: self.created_at,
            expires_at: self.expires_at,
            download_count: self.download_count,
            download_limit: self.download_limit,
            terminal: self.terminal,
            locked: self.is_locked(),
            status: self.status(),
        }
    }
}

/// Snapshot of a link's metadata. Never carries the payload or the secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    /// Lookup token.
    pub token: LinkToken,
    /// Download filename.
    pub display_name: String,
    /// Payload length in bytes.
    pub size_bytes: u64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Absolute expiry time, if the link has a TTL.
    pub expires_at: Option<DateTime<Utc>>,
    /// Successful downloads so far.
    pub download_count: u64,
    /// Download limit, if any.
    pub download_limit: Option<u64>,
    /// Whether the link is permanently dead.
    pub terminal: bool,
    /// Whether the link is password-locked.
    pub locked: bool,
    /// Combined client-visible state.
    pub status: LinkStatus,
}

impl LinkInfo {
    /// Whether a download attempted now would be served.
    pub fn is_available(&self) -> bool {
        self.status == LinkStatus::Available
    }
}

/// A successfully authorized download.
#[derive(Debug, Clone)]
pub struct ConsumedLink {
    /// Token the download was authorized against.
    pub token: LinkToken,
    /// Shared handle to the stored bytes; stays valid after the link is removed.
    pub payload: Bytes,
    /// Download filename.
    pub display_name: String,
    /// Download count after this download.
    pub download_count: u64,
}
