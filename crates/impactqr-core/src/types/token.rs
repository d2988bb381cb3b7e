//! Opaque link token.
//!
//! A token names exactly one link and doubles as a bearer capability:
//! whoever holds it may attempt a download. Tokens are drawn from the
//! random half of a v4 UUID, giving 32 bits of OS-sourced entropy.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of hex characters in a generated token.
pub const TOKEN_LEN: usize = 8;

/// Opaque identifier of a stored link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkToken(String);

impl LinkToken {
    /// Draw a fresh random token.
    ///
    /// Uniqueness against live tokens is the registry's job; this only
    /// guarantees the value is unpredictable.
    pub fn generate() -> Self {
        let mut simple = Uuid::new_v4().simple().to_string();
        simple.truncate(TOKEN_LEN);
        Self(simple)
    }

    /// Return the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative download URL for this token.
    pub fn download_path(&self) -> String {
        format!("/d/{}", self.0)
    }
}

impl fmt::Display for LinkToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LinkToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for LinkToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Borrow<str> for LinkToken {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LinkToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
