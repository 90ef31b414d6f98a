//! Administrative operations.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use gatekeeper_auth::password::PasswordHasher;
use gatekeeper_auth::revocation::{RevocationChannel, SideEffect};
use gatekeeper_core::config::auth::BootstrapAdminConfig;
use gatekeeper_core::error::AppError;
use gatekeeper_core::result::AppResult;
use gatekeeper_database::store::ClientStore;
use gatekeeper_entity::client::Client;
use gatekeeper_entity::group::ADMIN_GROUP;

/// Outcome of a suspension.
#[derive(Debug, Clone, Serialize)]
pub struct SuspensionReport {
    pub client_id: Uuid,
    pub revocation: SideEffect,
}

/// Admin-level client management.
#[derive(Debug, Clone)]
pub struct AdminClientService {
    store: Arc<dyn ClientStore>,
    hasher: Arc<PasswordHasher>,
    revocation: Arc<RevocationChannel>,
}

impl AdminClientService {
    /// Creates a new admin client service.
    pub fn new(
        store: Arc<dyn ClientStore>,
        hasher: Arc<PasswordHasher>,
        revocation: Arc<RevocationChannel>,
    ) -> Self {
        Self {
            store,
            hasher,
            revocation,
        }
    }

    /// Suspend a client.
    ///
    /// The stored flag is what keeps the client out; the revocation entry
    /// written afterwards only shortens the window for tokens already in
    /// flight, so its failure is reported and not raised.
    pub async fn suspend_client(&self, actor: &Client, target: Uuid) -> AppResult<SuspensionReport> {
        if !self.store.set_suspended(target, true).await? {
            return Err(AppError::not_found(format!("Client {target} not found")));
        }
        let revocation = self.revocation.revoke(target).await;

        info!(
            actor_id = %actor.id,
            client_id = %target,
            revocation = revocation.is_applied(),
            "Client suspended"
        );
        Ok(SuspensionReport {
            client_id: target,
            revocation,
        })
    }

    /// Make sure the configured bootstrap admin exists.
    ///
    /// An existing account with that email is left untouched.
    pub async fn ensure_admin(&self, config: &BootstrapAdminConfig) -> AppResult<Client> {
        if let Some(existing) = self.store.find_by_email(&config.email).await? {
            if !existing.is_admin() {
                warn!(
                    email = %existing.email,
                    "Bootstrap admin email belongs to a client without the admin group"
                );
            }
            return Ok(existing);
        }

        let digest = self.hasher.hash(&config.password)?;
        let admin = Client::new_human(
            config.email.as_str(),
            config.first_name.as_str(),
            config.last_name.as_str(),
            digest,
            vec![ADMIN_GROUP.to_string()],
        );
        self.store.insert(&admin).await?;

        info!(client_id = %admin.id, email = %admin.email, "Bootstrap admin created");
        Ok(admin)
    }
}
