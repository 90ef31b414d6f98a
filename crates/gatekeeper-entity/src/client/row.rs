//! Flat persistence shape of a client.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use gatekeeper_core::error::AppError;

use super::kind::ClientKind;
use super::model::Client;

/// One row of the `clients` table.
///
/// Kind-specific columns are nullable; [`TryFrom`] rebuilds the tagged
/// [`ClientKind`] and rejects rows that mix the two shapes.
#[derive(Debug, Clone, FromRow)]
pub struct ClientRow {
    pub id: Uuid,
    pub email: String,
    pub kind: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub hashed_password: Option<String>,
    pub name: Option<String>,
    pub groups: Vec<String>,
    pub suspended: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for Client {
    type Error = AppError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let kind = match (row.kind.as_str(), row.hashed_password, row.name) {
            ("human", Some(hashed_password), None) => ClientKind::Human {
                first_name: row.first_name.unwrap_or_default(),
                last_name: row.last_name.unwrap_or_default(),
                hashed_password,
            },
            ("service", None, Some(name)) => ClientKind::Service { name },
            (kind, _, _) => {
                return Err(AppError::database(format!(
                    "Client {} has an inconsistent '{kind}' record",
                    row.id
                )));
            }
        };

        Ok(Self {
            id: row.id,
            email: row.email,
            groups: row.groups,
            suspended: row.suspended,
            created_at: row.created_at,
            kind,
        })
    }
}

impl From<&Client> for ClientRow {
    fn from(client: &Client) -> Self {
        let (first_name, last_name, hashed_password, name) = match &client.kind {
            ClientKind::Human {
                first_name,
                last_name,
                hashed_password,
            } => (
                Some(first_name.clone()),
                Some(last_name.clone()),
                Some(hashed_password.clone()),
                None,
            ),
            ClientKind::Service { name } => (None, None, None, Some(name.clone())),
        };

        Self {
            id: client.id,
            email: client.email.clone(),
            kind: client.kind.as_str().to_string(),
            first_name,
            last_name,
            hashed_password,
            name,
            groups: client.groups.clone(),
            suspended: client.suspended,
            created_at: client.created_at,
        }
    }
}
