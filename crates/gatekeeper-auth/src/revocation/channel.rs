//! Blacklist writes, blacklist lookups, and deletion broadcasts.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use gatekeeper_cache::keys::{self, DELETION_TOPIC};
use gatekeeper_cache::provider::CacheManager;
use gatekeeper_core::result::AppResult;
use gatekeeper_core::traits::cache::CacheProvider;

use super::metrics::SideEffectMetrics;

/// Result of a best-effort side effect.
///
/// Failures are logged and counted here and never become the caller's
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum SideEffect {
    Applied,
    Failed(String),
}

impl SideEffect {
    /// Whether the side effect took place.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// The cache-backed revocation side-channel.
///
/// A revocation entry is keyed by the bare subject id, holds the id as its
/// value, and lives for the full session TTL: no token issued before the
/// entry was written can outlive it.
#[derive(Debug, Clone)]
pub struct RevocationChannel {
    cache: Arc<CacheManager>,
    entry_ttl: Duration,
    metrics: Arc<SideEffectMetrics>,
}

impl RevocationChannel {
    /// Create a channel whose entries live for `entry_ttl`.
    pub fn new(cache: Arc<CacheManager>, entry_ttl: Duration) -> Self {
        Self {
            cache,
            entry_ttl,
            metrics: Arc::new(SideEffectMetrics::new()),
        }
    }

    /// Side-effect counters.
    pub fn metrics(&self) -> &SideEffectMetrics {
        &self.metrics
    }

    /// Blacklist every session of `subject` for the entry TTL.
    pub async fn revoke(&self, subject: Uuid) -> SideEffect {
        let key = keys::revocation(subject);
        let result = self.cache.set(&key, &key, self.entry_ttl).await;
        self.metrics.record_revocation(result.is_ok());

        match result {
            Ok(()) => {
                debug!(client_id = %subject, ttl_secs = self.entry_ttl.as_secs(), "Revocation entry written");
                SideEffect::Applied
            }
            Err(e) => {
                warn!(client_id = %subject, error = %e, "Failed to write revocation entry");
                SideEffect::Failed(e.message)
            }
        }
    }

    /// Whether `subject` currently has a revocation entry.
    pub async fn is_revoked(&self, subject: Uuid) -> AppResult<bool> {
        self.cache.exists(&keys::revocation(subject)).await
    }

    /// Announce the deletion of `subject` to downstream consumers.
    pub async fn broadcast_deletion(&self, subject: Uuid) -> SideEffect {
        let result = self
            .cache
            .publish(DELETION_TOPIC, &subject.to_string())
            .await;
        self.metrics.record_broadcast(result.is_ok());

        match result {
            Ok(receivers) => {
                debug!(client_id = %subject, receivers, "Deletion broadcast published");
                SideEffect::Applied
            }
            Err(e) => {
                warn!(client_id = %subject, error = %e, "Failed to publish deletion broadcast");
                SideEffect::Failed(e.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use gatekeeper_cache::memory::MemoryCacheProvider;
    use gatekeeper_core::error::AppError;

    use super::*;

    const TTL: Duration = Duration::from_secs(15 * 60);

    fn memory_channel() -> (RevocationChannel, MemoryCacheProvider) {
        let provider = MemoryCacheProvider::new("");
        let cache = Arc::new(CacheManager::from_provider(Arc::new(provider.clone())));
        (RevocationChannel::new(cache, TTL), provider)
    }

    #[derive(Debug)]
    struct UnreachableCache;

    #[async_trait]
    impl CacheProvider for UnreachableCache {
        async fn get(&self, _key: &str) -> AppResult<Option<String>> {
            Err(AppError::cache("connection refused"))
        }
        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
            Err(AppError::cache("connection refused"))
        }
        async fn exists(&self, _key: &str) -> AppResult<bool> {
            Err(AppError::cache("connection refused"))
        }
        async fn publish(&self, _topic: &str, _payload: &str) -> AppResult<u64> {
            Err(AppError::cache("connection refused"))
        }
        async fn health_check(&self) -> AppResult<bool> {
            Ok(false)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn entry_is_stored_under_subject_and_expires_after_ttl() {
        let (channel, provider) = memory_channel();
        let subject = Uuid::new_v4();

        assert!(channel.revoke(subject).await.is_applied());
        assert_eq!(
            provider.get(&subject.to_string()).await.expect("get"),
            Some(subject.to_string())
        );

        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        assert!(channel.is_revoked(subject).await.expect("lookup"));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!channel.is_revoked(subject).await.expect("lookup"));
    }

    #[tokio::test]
    async fn broadcast_carries_subject_id() {
        let (channel, provider) = memory_channel();
        let mut rx = provider.subscribe(DELETION_TOPIC);
        let subject = Uuid::new_v4();

        assert!(channel.broadcast_deletion(subject).await.is_applied());
        assert_eq!(rx.recv().await.expect("message"), subject.to_string());
        assert_eq!(channel.metrics().snapshot().broadcasts_published, 1);
    }

    #[tokio::test]
    async fn failures_are_reported_and_counted() {
        let cache = Arc::new(CacheManager::from_provider(Arc::new(UnreachableCache)));
        let channel = RevocationChannel::new(cache, TTL);
        let subject = Uuid::new_v4();

        assert!(!channel.revoke(subject).await.is_applied());
        assert!(!channel.broadcast_deletion(subject).await.is_applied());
        assert!(channel.is_revoked(subject).await.is_err());

        let snapshot = channel.metrics().snapshot();
        assert_eq!(snapshot.revocations_failed, 1);
        assert_eq!(snapshot.broadcasts_failed, 1);
        assert_eq!(snapshot.revocations_written, 0);
    }
}
