//! # impactqr-core
//!
//! Core crate for ImpactQR. Contains configuration schemas, the link token
//! type, and the unified error system.
//!
//! This crate has **no** internal dependencies on other ImpactQR crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
pub use types::token::LinkToken;
