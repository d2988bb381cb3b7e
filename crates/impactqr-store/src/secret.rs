//! Argon2id hashing for link lock passwords.
//!
//! The registry never keeps a lock password in clear text: [`SecretHasher`]
//! turns it into a salted PHC string wrapped in [`LockSecret`], whose
//! `Debug` output is redacted so it cannot leak through logs.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use impactqr_core::config::SecretHashConfig;
use impactqr_core::error::AppError;

use crate::error::LinkError;

/// A stored lock password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct LockSecret(String);

impl fmt::Debug for LockSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LockSecret(<redacted>)")
    }
}

/// Hashes and verifies lock passwords using Argon2id.
#[derive(Debug, Clone)]
pub struct SecretHasher {
    params: Params,
}

impl SecretHasher {
    /// Creates a hasher with the configured cost parameters.
    pub fn new(config: &SecretHashConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;

        Ok(Self { params })
    }

    /// Hashes a non-empty password with a random salt.
    pub fn hash(&self, password: &str) -> Result<LockSecret, LinkError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| LinkError::Hashing(e.to_string()))?;

        Ok(LockSecret(hash.to_string()))
    }

    /// Verifies a password against a stored hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    pub fn verify(&self, password: &str, stored: &LockSecret) -> Result<bool, LinkError> {
        let parsed = PasswordHash::new(&stored.0)
            .map_err(|e| LinkError::Hashing(format!("Invalid password hash format: {e}")))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(LinkError::Hashing(e.to_string())),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for SecretHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

#[cfg(test)]
pub(crate) fn fast_hasher() -> SecretHasher {
    SecretHasher::new(&SecretHashConfig {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap()
}
