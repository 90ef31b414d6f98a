//! Postgres pool construction.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use gatekeeper_core::config::database::DatabaseConfig;
use gatekeeper_core::error::{AppError, ErrorKind};
use gatekeeper_core::redact::redact_url;
use gatekeeper_core::result::AppResult;

/// Open a pool sized by `config`. Failure to reach the server is reported as
/// `ServiceUnavailable` so that startup retries it; the password never
/// appears in logs or messages.
pub async fn connect_pool(config: &DatabaseConfig) -> AppResult<PgPool> {
    let url = redact_url(&config.url);
    info!(
        url = %url,
        pool_max = config.max_connections,
        pool_min = config.min_connections,
        "Opening Postgres pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .connect(&config.url)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::ServiceUnavailable,
                format!("Postgres unreachable at {url}: {e}"),
                e,
            )
        })?;

    info!(url = %url, "Postgres pool ready");
    Ok(pool)
}
