//! Rejection reasons returned by registry operations.

use thiserror::Error;

use impactqr_core::error::AppError;

/// Why a registry operation did not succeed.
///
/// Every variant except [`LinkError::Hashing`] is routine control flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// No link is stored under the token.
    #[error("Link not found")]
    NotFound,

    /// The link is password-locked.
    #[error("Link is locked")]
    Locked {
        /// Display name of the locked payload.
        display_name: String,
    },

    /// The link ran out of time or downloads.
    #[error("{}", expired_message(.downloads, .limit))]
    Expired {
        /// Display name of the expired payload.
        display_name: String,
        /// Downloads served so far.
        downloads: u64,
        /// Configured download limit, if any.
        limit: Option<u64>,
    },

    /// A lock was requested with an empty password.
    #[error("Password required")]
    InvalidSecret,

    /// An unlock attempt supplied the wrong (or an empty) password.
    #[error("Wrong password")]
    WrongSecret,

    /// Hashing or verifying a password failed.
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// User-facing explanation for an expired link.
pub fn expired_reason(downloads: u64, limit: Option<u64>) -> String {
    match limit {
        Some(limit) => format!("Download limit reached ({downloads}/{limit})."),
        None => "This link is no longer available.".to_string(),
    }
}

fn expired_message(downloads: &u64, limit: &Option<u64>) -> String {
    expired_reason(*downloads, *limit)
}

impl From<LinkError> for AppError {
    fn from(err: LinkError) -> Self {
        let message = err.to_string();
        match err {
            LinkError::NotFound => AppError::not_found(message),
            LinkError::Locked { .. } => AppError::locked(message),
            LinkError::Expired { .. } => AppError::expired(message),
            LinkError::InvalidSecret => AppError::validation(message),
            LinkError::WrongSecret => AppError::wrong_secret(message),
            LinkError::Hashing(_) => AppError::internal(message),
        }
    }
}
