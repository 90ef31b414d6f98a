//! PostgreSQL client store.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use gatekeeper_core::error::{AppError, ErrorKind};
use gatekeeper_core::result::AppResult;
use gatekeeper_entity::client::model::normalize_email;
use gatekeeper_entity::client::{Client, ClientRow};

use crate::store::ClientStore;

const SELECT_COLUMNS: &str = "SELECT id, email, kind, first_name, last_name, hashed_password, \
     name, groups, suspended, created_at FROM clients";

/// [`ClientStore`] over the `clients` table.
#[derive(Debug, Clone)]
pub struct PgClientStore {
    pool: PgPool,
}

impl PgClientStore {
    /// Create a new client store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientStore for PgClientStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Client>> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "{SELECT_COLUMNS} WHERE LOWER(email) = $1"
        ))
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find client by email", e))?;

        row.map(Client::try_from).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>> {
        let row = sqlx::query_as::<_, ClientRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find client by id", e)
            })?;

        row.map(Client::try_from).transpose()
    }

    async fn insert(&self, client: &Client) -> AppResult<()> {
        let row = ClientRow::from(client);
        sqlx::query(
            r#"INSERT INTO clients
                (id, email, kind, first_name, last_name, hashed_password, name, groups, suspended, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"#,
        )
        .bind(row.id)
        .bind(&row.email)
        .bind(&row.kind)
        .bind(&row.first_name)
        .bind(&row.last_name)
        .bind(&row.hashed_password)
        .bind(&row.name)
        .bind(&row.groups)
        .bind(row.suspended)
        .bind(row.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::conflict("An account with that email address is already registered")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to insert client", e),
        })?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete client", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, email: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM clients WHERE LOWER(email) = $1)")
            .bind(normalize_email(email))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check client email", e)
            })
    }

    async fn set_suspended(&self, id: Uuid, suspended: bool) -> AppResult<bool> {
        let result = sqlx::query("UPDATE clients SET suspended = $2 WHERE id = $1")
            .bind(id)
            .bind(suspended)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update suspension", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
