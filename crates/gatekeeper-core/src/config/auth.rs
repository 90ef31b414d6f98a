//! Authentication configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Longest accepted session lifetime (one week).
pub const MAX_SESSION_TTL_MINUTES: u64 = 7 * 24 * 60;

/// Upper bound on Argon2 memory cost, in KiB.
pub const MAX_ARGON2_MEMORY_KIB: u32 = 262_144;
/// Upper bound on Argon2 iterations.
pub const MAX_ARGON2_ITERATIONS: u32 = 10;
/// Upper bound on Argon2 lanes.
pub const MAX_ARGON2_PARALLELISM: u32 = 8;

/// Token, cookie, and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default)]
    pub jwt_secret: String,
    /// Lifetime of a user session token in minutes. Also the TTL of every
    /// revocation entry.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: u64,
    /// A session may only be refreshed once it is this close to expiry.
    #[serde(default = "default_refresh_grace")]
    pub refresh_grace_seconds: u64,
    /// Clock skew tolerated when checking `exp`.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Path attribute of the session cookie.
    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,
    /// Whether the session cookie carries the `Secure` attribute.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2 degree of parallelism.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
    /// Groups that cannot be requested at self-registration.
    #[serde(default = "default_restricted_groups")]
    pub restricted_groups: Vec<String>,
    /// Admin account ensured at startup, if configured.
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

/// Credentials for the admin account seeded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdminConfig {
    /// Admin email.
    pub email: String,
    /// Admin plaintext password, hashed before storage.
    pub password: String,
    /// Admin first name.
    #[serde(default = "default_admin_name")]
    pub first_name: String,
    /// Admin last name.
    #[serde(default = "default_admin_name")]
    pub last_name: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            session_ttl_minutes: default_session_ttl(),
            refresh_grace_seconds: default_refresh_grace(),
            leeway_seconds: default_leeway(),
            cookie_name: default_cookie_name(),
            cookie_path: default_cookie_path(),
            cookie_secure: false,
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            restricted_groups: default_restricted_groups(),
            bootstrap_admin: None,
        }
    }
}

impl AuthConfig {
    /// Session token lifetime, capped at `MAX_SESSION_TTL_MINUTES`.
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_minutes.min(MAX_SESSION_TTL_MINUTES) * 60)
    }

    /// Refresh window, never longer than the session itself.
    pub fn refresh_grace(&self) -> Duration {
        Duration::from_secs(self.refresh_grace_seconds).min(self.session_ttl())
    }

    /// Argon2 `(memory_kib, iterations, parallelism)` clamped to the
    /// configured upper bounds. Argon2 needs at least 8 KiB per lane.
    pub fn bounded_argon2_params(&self) -> (u32, u32, u32) {
        let parallelism = self.argon2_parallelism.clamp(1, MAX_ARGON2_PARALLELISM);
        (
            self.argon2_memory_kib
                .clamp(8 * parallelism, MAX_ARGON2_MEMORY_KIB),
            self.argon2_iterations.clamp(1, MAX_ARGON2_ITERATIONS),
            parallelism,
        )
    }
}

fn default_session_ttl() -> u64 {
    15
}

fn default_refresh_grace() -> u64 {
    30
}

fn default_leeway() -> u64 {
    5
}

fn default_cookie_name() -> String {
    "token".to_string()
}

fn default_cookie_path() -> String {
    "/".to_string()
}

fn default_argon2_memory() -> u32 {
    19_456
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_argon2_parallelism() -> u32 {
    1
}

fn default_restricted_groups() -> Vec<String> {
    vec!["admin".to_string(), "service".to_string()]
}

fn default_admin_name() -> String {
    "Admin".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argon2_params_are_clamped() {
        let config = AuthConfig {
            argon2_memory_kib: 10_000_000,
            argon2_iterations: 0,
            argon2_parallelism: 64,
            ..AuthConfig::default()
        };
        assert_eq!(
            config.bounded_argon2_params(),
            (MAX_ARGON2_MEMORY_KIB, 1, MAX_ARGON2_PARALLELISM)
        );
    }

    #[test]
    fn session_ttl_is_in_minutes() {
        let config = AuthConfig::default();
        assert_eq!(config.session_ttl(), Duration::from_secs(15 * 60));
    }

    #[test]
    fn oversized_lifetimes_are_capped() {
        let config = AuthConfig {
            session_ttl_minutes: u64::MAX,
            refresh_grace_seconds: u64::MAX,
            ..AuthConfig::default()
        };
        let cap = Duration::from_secs(MAX_SESSION_TTL_MINUTES * 60);
        assert_eq!(config.session_ttl(), cap);
        assert_eq!(config.refresh_grace(), cap);
    }
}
