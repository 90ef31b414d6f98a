//! In-memory client store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use gatekeeper_core::error::AppError;
use gatekeeper_core::result::AppResult;
use gatekeeper_entity::client::Client;
use gatekeeper_entity::client::model::normalize_email;

use crate::store::ClientStore;

/// [`ClientStore`] kept in process memory.
///
/// The email index is claimed before the record is written, so two
/// concurrent registrations for the same email cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryClientStore {
    clients: DashMap<Uuid, Client>,
    emails: DashMap<String, Uuid>,
}

impl MemoryClientStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored clients.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Client>> {
        let Some(id) = self.emails.get(&normalize_email(email)).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self.clients.get(&id).map(|c| c.value().clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>> {
        Ok(self.clients.get(&id).map(|c| c.value().clone()))
    }

    async fn insert(&self, client: &Client) -> AppResult<()> {
        if self.clients.contains_key(&client.id) {
            return Err(AppError::conflict(format!("Client {} already exists", client.id)));
        }
        match self.emails.entry(normalize_email(&client.email)) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "An account with that email address is already registered",
            )),
            Entry::Vacant(slot) => {
                slot.insert(client.id);
                self.clients.insert(client.id, client.clone());
                Ok(())
            }
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        match self.clients.remove(&id) {
            Some((_, client)) => {
                self.emails.remove(&normalize_email(&client.email));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn exists(&self, email: &str) -> AppResult<bool> {
        Ok(self.emails.contains_key(&normalize_email(email)))
    }

    async fn set_suspended(&self, id: Uuid, suspended: bool) -> AppResult<bool> {
        match self.clients.get_mut(&id) {
            Some(mut client) => {
                client.suspended = suspended;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
