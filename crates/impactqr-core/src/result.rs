//! Convenience result type alias for ImpactQR.

use crate::error::AppError;

/// A specialized `Result` type for ImpactQR operations.
pub type AppResult<T> = Result<T, AppError>;
