//! Expiring key-value storage plus topic publication.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// The channel revocations and deletion notices travel on.
///
/// Keys go through the provider's configured prefix; topic names are used
/// verbatim. Publication is fire-and-forget.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// `None` once the entry's TTL has elapsed.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value`, overwriting any previous value and resetting the TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Returns how many subscribers received the payload; zero is not an
    /// error.
    async fn publish(&self, topic: &str, payload: &str) -> AppResult<u64>;

    /// Round-trip to the backend.
    async fn health_check(&self) -> AppResult<bool>;
}
