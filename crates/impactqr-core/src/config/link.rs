//! Link lifetime, reaper, and lock-secret configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Link lifetime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Minutes a link stays valid after upload. `0` disables expiry.
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,
    /// Seconds between reaper sweeps.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
    /// Argon2id cost parameters for lock passwords.
    #[serde(default)]
    pub secret: SecretHashConfig,
}

impl LinkConfig {
    /// Link time-to-live, or `None` when links never expire by time.
    ///
    /// A minute count too large to express in seconds also means no expiry.
    pub fn ttl(&self) -> Option<Duration> {
        if self.ttl_minutes == 0 {
            return None;
        }
        self.ttl_minutes.checked_mul(60).map(Duration::from_secs)
    }

    /// Requested sweep period (the reaper applies its own floor).
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
            sweep_interval_seconds: default_sweep_interval(),
            secret: SecretHashConfig::default(),
        }
    }
}

/// Argon2id parameters used to hash lock passwords.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretHashConfig {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Number of passes.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for SecretHashConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_ttl_minutes() -> u64 {
    60
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_memory_kib() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
