//! Embedded schema migrations for the Postgres credential store.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use gatekeeper_core::error::{AppError, ErrorKind};
use gatekeeper_core::result::AppResult;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the schema up to date. Already-applied migrations are skipped.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    let known = MIGRATOR.iter().count();
    info!(known, "Applying credential store migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
    })?;

    info!("Credential store schema is current");
    Ok(())
}
