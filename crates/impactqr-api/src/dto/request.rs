//! Request DTOs.

use serde::Deserialize;

/// Lock or unlock request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LockRequest {
    /// Link password. Surrounding whitespace is ignored.
    #[serde(default)]
    pub password: Option<String>,
}

impl LockRequest {
    /// The trimmed password, empty when absent.
    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default().trim()
    }
}

/// Query string accepted by `POST /api/lock/{token}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LockQuery {
    /// `1` turns the request into an unlock using the `x-password` header.
    #[serde(default)]
    pub unlock: Option<String>,
}

impl LockQuery {
    /// Whether this is the header-based unlock fallback.
    pub fn is_unlock(&self) -> bool {
        self.unlock.as_deref() == Some("1")
    }
}
