//! Settings, one sub-module per TOML section.
//!
//! Sources are layered: `config/default.toml`, then `config/{env}.toml`,
//! then `GATEKEEPER__SECTION__KEY` environment variables.

pub mod app;
pub mod auth;
pub mod cache;
pub mod database;
pub mod logging;
pub mod startup;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::{AuthConfig, MAX_SESSION_TTL_MINUTES};
use self::cache::CacheConfig;
use self::database::DatabaseConfig;
use self::logging::LoggingConfig;
use self::startup::StartupConfig;

use crate::error::AppError;
use crate::result::AppResult;

/// Minimum length, in bytes, of the HMAC signing secret.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Everything the server needs, built once in `main` and passed down
/// explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    /// Token, cookie, and password hashing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Collaborator connection retry settings.
    #[serde(default)]
    pub startup: StartupConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Layer every source for `env` and validate the result.
    pub fn load(env: &str) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("GATEKEEPER")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_allowed_origins")
                    .with_list_parse_key("auth.restricted_groups")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Could not read settings: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Invalid settings: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the service cannot run safely with.
    pub fn validate(&self) -> AppResult<()> {
        if self.auth.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {MIN_JWT_SECRET_LEN} bytes"
            )));
        }
        if !(1..=MAX_SESSION_TTL_MINUTES).contains(&self.auth.session_ttl_minutes) {
            return Err(AppError::configuration(format!(
                "auth.session_ttl_minutes must be between 1 and {MAX_SESSION_TTL_MINUTES}"
            )));
        }
        if self.auth.cookie_name.is_empty() {
            return Err(AppError::configuration("auth.cookie_name must not be empty"));
        }
        Ok(())
    }
}
