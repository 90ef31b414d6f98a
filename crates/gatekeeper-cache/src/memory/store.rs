//! In-memory cache with per-entry expiry and broadcast topics.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::debug;

use gatekeeper_core::result::AppResult;
use gatekeeper_core::traits::cache::CacheProvider;

/// Messages buffered per topic before slow subscribers start lagging.
const TOPIC_CAPACITY: usize = 256;

/// Every this many writes, all expired entries are purged.
const SWEEP_EVERY: usize = 64;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-memory cache provider.
///
/// Expiry is measured on the tokio clock, so paused-time tests can step
/// past a TTL with `tokio::time::advance`. Expired entries are dropped
/// on access, and a full sweep runs every `SWEEP_EVERY` writes so keys
/// that are never read again do not accumulate.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    entries: Arc<DashMap<String, Entry>>,
    topics: Arc<DashMap<String, broadcast::Sender<String>>>,
    writes: Arc<AtomicUsize>,
    key_prefix: String,
}

impl MemoryCacheProvider {
    /// Create an empty cache.
    pub fn new(key_prefix: &str) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            topics: Arc::new(DashMap::new()),
            writes: Arc::new(AtomicUsize::new(0)),
            key_prefix: key_prefix.to_string(),
        }
    }

    /// Subscribe to a topic. Only messages published after this call are
    /// received.
    pub fn subscribe(&self, topic: &str) -> broadcast::Receiver<String> {
        self.topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(TOPIC_CAPACITY).0)
            .subscribe()
    }

    fn prefixed_key(&self, key: &str) -> String {
        format!("{}{key}", self.key_prefix)
    }

    fn sweep_expired(&self) {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| e.expires_at > now);
        let purged = before.saturating_sub(self.entries.len());
        if purged > 0 {
            debug!(purged, "Swept expired cache entries");
        }
    }

    fn live_value(&self, key: &str) -> Option<String> {
        let full_key = self.prefixed_key(key);
        let now = Instant::now();
        let value = self
            .entries
            .get(&full_key)
            .filter(|e| e.expires_at > now)
            .map(|e| e.value.clone());
        if value.is_none() {
            self.entries.remove_if(&full_key, |_, e| e.expires_at <= now);
        }
        value
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.live_value(key))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.entries.insert(
            self.prefixed_key(key),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        if (self.writes.fetch_add(1, Ordering::Relaxed) + 1) % SWEEP_EVERY == 0 {
            self.sweep_expired();
        }
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.live_value(key).is_some())
    }

    async fn publish(&self, topic: &str, payload: &str) -> AppResult<u64> {
        let delivered = match self.topics.get(topic) {
            // A send error only means nobody is listening.
            Some(sender) => sender.send(payload.to_string()).unwrap_or(0) as u64,
            None => 0,
        };
        debug!(topic, delivered, "Published message");
        Ok(delivered)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
