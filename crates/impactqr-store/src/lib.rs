//! # impactqr-store
//!
//! The ephemeral link store. A [`BlobRegistry`] maps opaque tokens to
//! uploaded payloads and enforces, per link:
//!
//! - **time-to-live** expiry, evaluated lazily on every access
//! - **download limits**, consumed atomically so the last slot is never
//!   handed out twice
//! - **password locks**, with the secret kept only as an Argon2id hash
//!
//! Dead links are removed by [`BlobRegistry::sweep`], which the reaper in
//! `impactqr-worker` calls on a timer.

pub mod error;
pub mod record;
pub mod registry;
pub mod secret;
pub mod stats;

pub use error::LinkError;
pub use record::{ConsumedLink, LinkInfo, LinkStatus, NewLink};
pub use registry::BlobRegistry;
pub use secret::SecretHasher;
pub use stats::LinkStats;
