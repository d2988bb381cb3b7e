//! Upload orchestration for ImpactQR.
//!
//! Sits between the HTTP gateway and the registry: enforces the configured
//! size budgets, bundles multi-file uploads into a single ZIP payload, and
//! creates the link.

pub mod bundle;
pub mod upload;

pub use upload::{UploadService, UploadedFile, parse_download_limit};
