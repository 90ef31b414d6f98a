//! Where client records live.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `"postgres"` or `"memory"`. The memory store forgets everything on
    /// restart and exists for tests and local runs.
    pub provider: String,
    pub url: String,
    /// Pool bounds for the Postgres store.
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection.
    pub connect_timeout_seconds: u64,
    /// Apply embedded migrations before serving.
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            provider: "postgres".into(),
            url: "postgres://localhost:5432/gatekeeper".into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_seconds: 5,
            run_migrations: true,
        }
    }
}
