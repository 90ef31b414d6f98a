//! Client self-service: registration, profile, and deletion.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use gatekeeper_auth::jwt::{IssuedToken, TokenCodec};
use gatekeeper_auth::password::PasswordHasher;
use gatekeeper_auth::revocation::{RevocationChannel, SideEffect};
use gatekeeper_core::error::AppError;
use gatekeeper_core::result::AppResult;
use gatekeeper_database::store::ClientStore;
use gatekeeper_entity::client::Client;
use gatekeeper_entity::group::SERVICE_GROUP;

const DUPLICATE_EMAIL: &str = "An account with that email address is already registered";

/// Registration data for a human user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub groups: Vec<String>,
}

/// Registration data for a service client.
#[derive(Debug, Clone)]
pub struct NewService {
    pub email: String,
    pub name: String,
    pub groups: Vec<String>,
}

/// A registered service and its non-expiring token.
#[derive(Debug, Clone)]
pub struct ServiceRegistration {
    pub client: Client,
    pub token: IssuedToken,
}

/// What happened during a self-delete.
#[derive(Debug, Clone, Serialize)]
pub struct DeletionReport {
    /// The deleted client.
    pub client_id: Uuid,
    /// Publication on the deletion topic.
    pub broadcast: SideEffect,
    /// Revocation entry write.
    pub revocation: SideEffect,
    /// Whether a record was actually removed; `false` if it was already gone.
    pub removed: bool,
}

/// Registration, profile, and self-delete operations.
#[derive(Debug, Clone)]
pub struct ClientService {
    store: Arc<dyn ClientStore>,
    hasher: Arc<PasswordHasher>,
    codec: Arc<TokenCodec>,
    revocation: Arc<RevocationChannel>,
    restricted_groups: Vec<String>,
}

impl ClientService {
    /// Creates a new client service. `restricted_groups` cannot be
    /// requested at registration.
    pub fn new(
        store: Arc<dyn ClientStore>,
        hasher: Arc<PasswordHasher>,
        codec: Arc<TokenCodec>,
        revocation: Arc<RevocationChannel>,
        restricted_groups: Vec<String>,
    ) -> Self {
        Self {
            store,
            hasher,
            codec,
            revocation,
            restricted_groups,
        }
    }

    /// Register a human user.
    pub async fn register_user(&self, new: NewUser) -> AppResult<Client> {
        self.check_requested_groups(&new.groups, &[])?;
        if self.store.exists(&new.email).await? {
            return Err(AppError::conflict(DUPLICATE_EMAIL));
        }

        let digest = self.hasher.hash(&new.password)?;
        let client = Client::new_human(new.email, new.first_name, new.last_name, digest, new.groups);
        self.store.insert(&client).await?;

        info!(client_id = %client.id, email = %client.email, "User registered");
        Ok(client)
    }

    /// Register a service client and issue its non-expiring token.
    ///
    /// The `service` group is added when missing.
    pub async fn register_service(&self, new: NewService) -> AppResult<ServiceRegistration> {
        self.check_requested_groups(&new.groups, &[SERVICE_GROUP])?;
        if self.store.exists(&new.email).await? {
            return Err(AppError::conflict(DUPLICATE_EMAIL));
        }

        let client = Client::new_service(new.email, new.name, new.groups);
        self.store.insert(&client).await?;
        let token = self.codec.issue(client.id, &client.groups, None)?;

        info!(client_id = %client.id, email = %client.email, "Service registered");
        Ok(ServiceRegistration { client, token })
    }

    /// Delete a client and tell everyone who needs to know.
    ///
    /// The deletion broadcast goes out first, then the revocation entry is
    /// written, then the record is removed. Both side effects are attempted
    /// even if removal later fails, and their failures never fail the
    /// call. Deleting an absent client succeeds with `removed == false`.
    pub async fn delete_client(&self, id: Uuid) -> AppResult<DeletionReport> {
        let broadcast = self.revocation.broadcast_deletion(id).await;
        let revocation = self.revocation.revoke(id).await;

        let removed = self.store.delete(id).await.map_err(|e| {
            error!(client_id = %id, error = %e, "Failed to remove client record");
            e
        })?;

        info!(
            client_id = %id,
            removed,
            broadcast = broadcast.is_applied(),
            revocation = revocation.is_applied(),
            "Client deleted"
        );
        Ok(DeletionReport {
            client_id: id,
            broadcast,
            revocation,
            removed,
        })
    }

    fn check_requested_groups(&self, groups: &[String], allowed: &[&str]) -> AppResult<()> {
        let forbidden = groups.iter().find(|g| {
            self.restricted_groups.contains(*g) && !allowed.contains(&g.as_str())
        });
        match forbidden {
            Some(group) => Err(AppError::validation(format!(
                "Group '{group}' cannot be requested at registration"
            ))),
            None => Ok(()),
        }
    }
}
