//! Fixed-backoff retry for collaborator connections at startup.

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::startup::StartupConfig;
use crate::result::AppResult;

/// Retry policy with a constant delay between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Delay between attempts.
    pub interval: Duration,
    /// Maximum attempts; `None` retries until success.
    pub max_attempts: Option<u32>,
}

impl From<&StartupConfig> for RetryPolicy {
    fn from(config: &StartupConfig) -> Self {
        Self {
            interval: config.retry_interval(),
            max_attempts: (config.max_attempts > 0).then_some(config.max_attempts),
        }
    }
}

impl RetryPolicy {
    /// Run `connect` until it succeeds, sleeping `interval` after each
    /// failure. The last error is returned once attempts are exhausted.
    pub async fn run<T, F, Fut>(&self, target: &str, mut connect: F) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match connect().await {
                Ok(value) => {
                    if attempt > 1 {
                        info!(target_name = target, attempt, "Connected after retrying");
                    }
                    return Ok(value);
                }
                Err(e) => {
                    if self.max_attempts.is_some_and(|max| attempt >= max) {
                        return Err(e);
                    }
                    warn!(
                        target_name = target,
                        attempt,
                        retry_in_ms = self.interval.as_millis() as u64,
                        error = %e,
                        "Connection attempt failed"
                    );
                    tokio::time::sleep(self.interval).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::error::AppError;

    fn policy(max_attempts: Option<u32>) -> RetryPolicy {
        RetryPolicy {
            interval: Duration::from_secs(2),
            max_attempts,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result = policy(None)
            .run("store", || {
                let counter = Arc::clone(&counter);
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                    if n < 3 {
                        Err(AppError::service_unavailable("not yet"))
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.ok(), Some(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result: AppResult<()> = policy(Some(4))
            .run("cache", || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(AppError::service_unavailable("down"))
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn zero_max_attempts_means_unbounded() {
        let config = StartupConfig {
            retry_interval_seconds: 1,
            max_attempts: 0,
        };
        let policy = RetryPolicy::from(&config);
        assert!(policy.max_attempts.is_none());
        assert_eq!(policy.interval, Duration::from_secs(1));
    }
}
