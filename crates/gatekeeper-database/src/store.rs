//! Credential store contract.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use gatekeeper_core::config::database::DatabaseConfig;
use gatekeeper_core::error::AppError;
use gatekeeper_core::result::AppResult;
use gatekeeper_entity::client::Client;

use crate::connection::connect_pool;
use crate::memory::MemoryClientStore;
use crate::migration::run_migrations;
use crate::repositories::client::PgClientStore;

/// Persistence for [`Client`] records.
///
/// Every method is a single-record operation; atomicity of each call is
/// delegated to the backend. Emails are matched in their normalized form.
#[async_trait]
pub trait ClientStore: Send + Sync + std::fmt::Debug + 'static {
    /// Look a client up by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Client>>;

    /// Look a client up by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>>;

    /// Insert a new client. A duplicate email yields a `Conflict` error.
    async fn insert(&self, client: &Client) -> AppResult<()>;

    /// Remove a client. Returns `false` if no such client existed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Whether a client with this email exists.
    async fn exists(&self, email: &str) -> AppResult<bool>;

    /// Set the suspension flag. Returns `false` if no such client existed.
    async fn set_suspended(&self, id: Uuid, suspended: bool) -> AppResult<bool>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Connect the store backend selected by `config.provider`.
pub async fn connect_store(config: &DatabaseConfig) -> AppResult<Arc<dyn ClientStore>> {
    match config.provider.as_str() {
        "postgres" => {
            let pool = connect_pool(config).await?;
            if config.run_migrations {
                run_migrations(&pool).await?;
            }
            Ok(Arc::new(PgClientStore::new(pool)))
        }
        "memory" => {
            info!("Using in-memory client store");
            Ok(Arc::new(MemoryClientStore::new()))
        }
        other => Err(AppError::configuration(format!(
            "Unknown database provider: {other}"
        ))),
    }
}
