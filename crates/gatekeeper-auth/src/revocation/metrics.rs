//! Counters for best-effort side effects.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Outcome counters for revocation writes and deletion broadcasts.
#[derive(Debug, Default)]
pub struct SideEffectMetrics {
    /// Revocation entries written
    pub revocations_written: AtomicU64,
    /// Revocation writes that failed
    pub revocations_failed: AtomicU64,
    /// Deletion broadcasts published
    pub broadcasts_published: AtomicU64,
    /// Deletion broadcasts that failed
    pub broadcasts_failed: AtomicU64,
}

impl SideEffectMetrics {
    /// Create new zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a revocation write
    pub fn record_revocation(&self, ok: bool) {
        let counter = if ok {
            &self.revocations_written
        } else {
            &self.revocations_failed
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a deletion broadcast
    pub fn record_broadcast(&self, ok: bool) {
        let counter = if ok {
            &self.broadcasts_published
        } else {
            &self.broadcasts_failed
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters
    pub fn snapshot(&self) -> SideEffectSnapshot {
        SideEffectSnapshot {
            revocations_written: self.revocations_written.load(Ordering::Relaxed),
            revocations_failed: self.revocations_failed.load(Ordering::Relaxed),
            broadcasts_published: self.broadcasts_published.load(Ordering::Relaxed),
            broadcasts_failed: self.broadcasts_failed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`SideEffectMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideEffectSnapshot {
    pub revocations_written: u64,
    pub revocations_failed: u64,
    pub broadcasts_published: u64,
    pub broadcasts_failed: u64,
}
