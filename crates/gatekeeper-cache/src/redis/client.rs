//! Redis connection handling.

use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use gatekeeper_core::config::cache::CacheConfig;
use gatekeeper_core::error::{AppError, ErrorKind};
use gatekeeper_core::redact::redact_url;
use gatekeeper_core::result::AppResult;

/// A reconnecting, multiplexed Redis connection plus the key prefix applied
/// to every cache key. Cloning shares the underlying connection.
#[derive(Debug, Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisClient {
    /// Open the connection described by `config.redis_url`.
    ///
    /// A malformed URL is a configuration error; an unreachable server is
    /// `ServiceUnavailable` so that startup retries it.
    pub async fn connect(config: &CacheConfig) -> AppResult<Self> {
        let url = redact_url(&config.redis_url);
        info!(url = %url, prefix = %config.key_prefix, "Connecting to Redis");

        let client = Client::open(config.redis_url.as_str()).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, format!("Invalid Redis URL {url}"), e)
        })?;
        let conn = ConnectionManager::new(client).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ServiceUnavailable,
                format!("Redis unreachable at {url}"),
                e,
            )
        })?;

        info!(url = %url, "Redis connection established");
        Ok(Self {
            conn,
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// A handle on the shared connection.
    pub fn connection(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// `key` with the configured prefix. Topics are never prefixed.
    pub fn key(&self, key: &str) -> String {
        format!("{}{key}", self.key_prefix)
    }
}
