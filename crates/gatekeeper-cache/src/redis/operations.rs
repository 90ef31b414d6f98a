//! `CacheProvider` over Redis: `SET EX`, `EXISTS`, `PUBLISH`.

use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, RedisError};
use tracing::debug;

use gatekeeper_core::error::{AppError, ErrorKind};
use gatekeeper_core::result::AppResult;
use gatekeeper_core::traits::cache::CacheProvider;

use super::client::RedisClient;

fn cache_error(op: &'static str) -> impl FnOnce(RedisError) -> AppError {
    move |e| AppError::with_source(ErrorKind::Cache, format!("Redis {op} failed: {e}"), e)
}

/// Redis-backed cache and pub/sub.
#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    client: RedisClient,
}

impl RedisCacheProvider {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.client
            .connection()
            .get(self.client.key(key))
            .await
            .map_err(cache_error("GET"))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let key = self.client.key(key);
        // SETEX rejects a zero expiry.
        let seconds = ttl.as_secs().max(1);
        self.client
            .connection()
            .set_ex::<_, _, ()>(&key, value, seconds)
            .await
            .map_err(cache_error("SETEX"))?;
        debug!(key = %key, ttl_secs = seconds, "Stored expiring key");
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.client
            .connection()
            .exists(self.client.key(key))
            .await
            .map_err(cache_error("EXISTS"))
    }

    async fn publish(&self, topic: &str, payload: &str) -> AppResult<u64> {
        let receivers: u64 = self
            .client
            .connection()
            .publish(topic, payload)
            .await
            .map_err(cache_error("PUBLISH"))?;
        debug!(topic, receivers, "Published message");
        Ok(receivers)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.connection();
        let reply: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(cache_error("PING"))?;
        Ok(reply == "PONG")
    }
}
