//! The blob registry: token → link table with its expiry, limit, and lock
//! state machine.
//!
//! The table is a [`DashMap`]. Every per-link read-modify-write runs while
//! holding that entry's shard write guard, so a consume, lock, unlock, or
//! sweep touching the same token can never interleave. Payloads are
//! [`Bytes`], so a download that was authorized keeps its bytes alive even
//! if the entry is removed before streaming finishes.

use std::fmt;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, info};

use impactqr_core::LinkToken;

use crate::error::LinkError;
use crate::record::{ConsumedLink, LinkInfo, LinkRecord, NewLink};
use crate::secret::SecretHasher;
use crate::stats::{LinkStats, StatsCounters};

/// In-memory registry of ephemeral download links.
pub struct BlobRegistry {
    /// Live links keyed by token.
    links: DashMap<LinkToken, LinkRecord>,
    /// Hasher for lock passwords.
    hasher: SecretHasher,
    /// Lifetime upload/download counters.
    counters: StatsCounters,
}

impl fmt::Debug for BlobRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobRegistry")
            .field("links", &self.links.len())
            .field("hasher", &self.hasher)
            .finish()
    }
}

impl Default for BlobRegistry {
    fn default() -> Self {
        Self::new(SecretHasher::default())
    }
}

impl BlobRegistry {
    /// Creates an empty registry.
    pub fn new(hasher: SecretHasher) -> Self {
        Self {
            links: DashMap::new(),
            hasher,
            counters: StatsCounters::default(),
        }
    }

    /// Number of stored links, dead or alive.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the registry holds no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Stores a new link and returns its metadata, including the token.
    ///
    /// The link is visible to lookups as soon as this returns.
    pub fn create(&self, link: NewLink) -> LinkInfo {
        self.create_at(link, Utc::now())
    }

    /// [`create`](Self::create) with an explicit creation instant.
    pub fn create_at(&self, link: NewLink, now: DateTime<Utc>) -> LinkInfo {
        self.create_with_at(|_| link, now)
    }

    /// Like [`create`](Self::create), but builds the link once its token is
    /// known, for payloads whose display name embeds the token.
    pub fn create_with(&self, build: impl FnOnce(&LinkToken) -> NewLink) -> LinkInfo {
        self.create_with_at(build, Utc::now())
    }

    fn create_with_at(
        &self,
        build: impl FnOnce(&LinkToken) -> NewLink,
        now: DateTime<Utc>,
    ) -> LinkInfo {
        let slot = loop {
            match self.links.entry(LinkToken::generate()) {
                Entry::Vacant(slot) => break slot,
                Entry::Occupied(taken) => {
                    debug!(token = %taken.key(), "Token collision, drawing again");
                }
            }
        };

        let token = slot.key().clone();
        let link = build(&token);
        let record = LinkRecord::new(token, link, now);
        let info = record.info();
        slot.insert(record);

        self.counters.record_upload(info.size_bytes);

        info!(
            token = %info.token,
            size = info.size_bytes,
            limit = ?info.download_limit,
            expires_at = ?info.expires_at,
            "Link created"
        );

        info
    }

    /// Looks up a link without consuming a download.
    ///
    /// A link found to be stale is latched terminal as a side effect; the
    /// download count is never touched.
    pub fn get(&self, token: &str) -> Result<LinkInfo, LinkError> {
        self.get_at(token, Utc::now())
    }

    /// [`get`](Self::get) evaluated at an explicit instant.
    pub fn get_at(&self, token: &str, now: DateTime<Utc>) -> Result<LinkInfo, LinkError> {
        let mut record = self.links.get_mut(token).ok_or(LinkError::NotFound)?;
        record.refresh(now);
        Ok(record.info())
    }

    /// Whether a download attempted now would be served.
    pub fn is_available(&self, token: &str) -> bool {
        self.get(token).is_ok_and(|info| info.is_available())
    }

    /// Authorizes one download.
    ///
    /// Checks lock, then liveness, then takes a download slot, all under the
    /// entry's write guard. Taking the last slot latches the link terminal
    /// in the same step, so concurrent callers can never both win it.
    pub fn consume(&self, token: &str) -> Result<ConsumedLink, LinkError> {
        self.consume_at(token, Utc::now())
    }

    /// [`consume`](Self::consume) evaluated at an explicit instant.
    pub fn consume_at(&self, token: &str, now: DateTime<Utc>) -> Result<ConsumedLink, LinkError> {
        let mut record = self.links.get_mut(token).ok_or(LinkError::NotFound)?;

        if record.is_locked() {
            return Err(LinkError::Locked {
                display_name: record.display_name.clone(),
            });
        }

        if record.refresh(now) {
            return Err(LinkError::Expired {
                display_name: record.display_name.clone(),
                downloads: record.download_count,
                limit: record.download_limit,
            });
        }

        record.download_count += 1;
        if record.limit_reached() {
            record.terminal = true;
        }

        let consumed = ConsumedLink {
            token: record.token.clone(),
            payload: record.payload.clone(),
            display_name: record.display_name.clone(),
            download_count: record.download_count,
        };
        let terminal = record.terminal;
        drop(record);

        self.counters.record_download();
        debug!(
            token = %consumed.token,
            downloads = consumed.download_count,
            terminal,
            "Download authorized"
        );

        Ok(consumed)
    }

    /// Locks a link behind `secret`, replacing any previous secret.
    pub fn lock(&self, token: &str, secret: &str) -> Result<(), LinkError> {
        if !self.links.contains_key(token) {
            return Err(LinkError::NotFound);
        }
        if secret.is_empty() {
            return Err(LinkError::InvalidSecret);
        }

        // Hash before taking the entry guard.
        let hashed = self.hasher.hash(secret)?;

        let mut record = self.links.get_mut(token).ok_or(LinkError::NotFound)?;
        let relocked = record.lock.replace(hashed).is_some();
        drop(record);

        info!(token, relocked, "Link locked");
        Ok(())
    }

    /// Unlocks a link if `secret` matches the stored one.
    ///
    /// Any mismatch, an empty secret, or a link that is not locked yields
    /// [`LinkError::WrongSecret`] and leaves the link untouched.
    pub fn unlock(&self, token: &str, secret: &str) -> Result<(), LinkError> {
        let stored = self
            .links
            .get(token)
            .ok_or(LinkError::NotFound)?
            .lock
            .clone();

        let Some(stored) = stored else {
            debug!(token, "Unlock attempted on an unlocked link");
            return Err(LinkError::WrongSecret);
        };

        if secret.is_empty() || !self.hasher.verify(secret, &stored)? {
            debug!(token, "Unlock rejected");
            return Err(LinkError::WrongSecret);
        }

        let mut record = self.links.get_mut(token).ok_or(LinkError::NotFound)?;
        // A concurrent re-lock installed a different secret; it wins.
        if record.lock.as_ref() != Some(&stored) {
            return Err(LinkError::WrongSecret);
        }
        record.lock = None;
        drop(record);

        info!(token, "Link unlocked");
        Ok(())
    }

    /// Deletes a link outright.
    pub fn remove(&self, token: &str) -> Result<(), LinkError> {
        let (token, _) = self.links.remove(token).ok_or(LinkError::NotFound)?;
        info!(token = %token, "Link removed");
        Ok(())
    }

    /// Removes every terminal or TTL-expired link and returns how many went.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    /// [`sweep`](Self::sweep) evaluated at an explicit instant.
    pub fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;
        self.links.retain(|_, record| {
            let dead = record.is_dead(now);
            if dead {
                removed += 1;
            }
            !dead
        });
        removed
    }

    /// Current statistics. Scans the table without mutating any link.
    pub fn stats(&self) -> LinkStats {
        self.stats_at(Utc::now())
    }

    /// [`stats`](Self::stats) evaluated at an explicit instant.
    pub fn stats_at(&self, now: DateTime<Utc>) -> LinkStats {
        let active = self
            .links
            .iter()
            .filter(|entry| entry.value().is_available(now))
            .count();

        self.counters.snapshot(active as u64)
    }
}
