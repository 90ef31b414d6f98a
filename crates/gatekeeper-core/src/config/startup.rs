//! Startup connection retry configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How collaborator connections are retried while the service boots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupConfig {
    /// Fixed delay between connection attempts, in seconds.
    #[serde(default = "default_retry_interval")]
    pub retry_interval_seconds: u64,
    /// Attempts before giving up. `0` retries forever.
    #[serde(default)]
    pub max_attempts: u32,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            retry_interval_seconds: default_retry_interval(),
            max_attempts: 0,
        }
    }
}

impl StartupConfig {
    /// Delay between attempts.
    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_seconds)
    }
}

fn default_retry_interval() -> u64 {
    2
}
