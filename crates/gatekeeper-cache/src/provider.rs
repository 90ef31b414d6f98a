//! Backend selection for the revocation channel.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use gatekeeper_core::config::cache::CacheConfig;
use gatekeeper_core::error::AppError;
use gatekeeper_core::result::AppResult;
use gatekeeper_core::traits::cache::CacheProvider;

/// The configured [`CacheProvider`], chosen once at startup by
/// `cache.provider` and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CacheManager {
    backend: Arc<dyn CacheProvider>,
}

impl CacheManager {
    /// Connect the backend named in `config`.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let backend = connect_backend(config).await?;
        Ok(Self { backend })
    }

    /// Wrap an already constructed backend.
    pub fn from_provider(backend: Arc<dyn CacheProvider>) -> Self {
        Self { backend }
    }
}

async fn connect_backend(config: &CacheConfig) -> AppResult<Arc<dyn CacheProvider>> {
    info!(provider = %config.provider, "Selecting cache backend");
    match config.provider.as_str() {
        #[cfg(feature = "redis-backend")]
        "redis" => {
            let client = crate::redis::RedisClient::connect(config).await?;
            Ok(Arc::new(crate::redis::RedisCacheProvider::new(client)))
        }
        #[cfg(feature = "memory")]
        "memory" => Ok(Arc::new(crate::memory::MemoryCacheProvider::new(
            &config.key_prefix,
        ))),
        other => Err(AppError::configuration(format!(
            "cache.provider must be 'redis' or 'memory', got '{other}'"
        ))),
    }
}

#[async_trait]
impl CacheProvider for CacheManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.backend.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.backend.set(key, value, ttl).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.backend.exists(key).await
    }

    async fn publish(&self, topic: &str, payload: &str) -> AppResult<u64> {
        self.backend.publish(topic, payload).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.backend.health_check().await
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_backend_is_a_configuration_error() {
        let config = CacheConfig {
            provider: "memcached".into(),
            ..CacheConfig::default()
        };
        let err = CacheManager::new(&config).await.unwrap_err();
        assert_eq!(err.kind, gatekeeper_core::error::ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn memory_backend_round_trips_through_the_manager() {
        let config = CacheConfig {
            provider: "memory".into(),
            ..CacheConfig::default()
        };
        let manager = CacheManager::new(&config).await.unwrap();
        manager
            .set("subject", "revoked", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(manager.exists("subject").await.unwrap());
        assert!(manager.health_check().await.unwrap());
    }
}
