//! Session lifecycle manager: login and refresh flows.
//!
//! Logout has no server-side state and lives entirely in the HTTP layer,
//! which overwrites the cookie with an expired one. A logged-out token
//! stays decodable until its natural expiry.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use gatekeeper_core::config::auth::AuthConfig;
use gatekeeper_core::error::AppError;
use gatekeeper_core::result::AppResult;
use gatekeeper_database::store::ClientStore;

use crate::engine::{AccessLevel, AuthEngine};
use crate::jwt::{IssuedToken, TokenCodec};
use crate::password::PasswordHasher;

/// Message for every failed login, whatever the cause.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Issues and renews user session tokens.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn ClientStore>,
    codec: Arc<TokenCodec>,
    hasher: Arc<PasswordHasher>,
    engine: Arc<AuthEngine>,
    session_ttl: chrono::Duration,
    refresh_grace: chrono::Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("session_ttl", &self.session_ttl)
            .field("refresh_grace", &self.refresh_grace)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        store: Arc<dyn ClientStore>,
        codec: Arc<TokenCodec>,
        hasher: Arc<PasswordHasher>,
        engine: Arc<AuthEngine>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            store,
            codec,
            hasher,
            engine,
            session_ttl: chrono::Duration::seconds(config.session_ttl().as_secs() as i64),
            refresh_grace: chrono::Duration::seconds(config.refresh_grace().as_secs() as i64),
        }
    }

    /// Verify credentials and issue a session token.
    ///
    /// Unknown email, wrong password, suspended account and service
    /// client all fail with the same authentication error.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<IssuedToken> {
        let Some(client) = self.store.find_by_email(email).await? else {
            self.hasher.verify_dummy(password);
            debug!("Login for unknown email");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        let Some(digest) = client.hashed_password() else {
            self.hasher.verify_dummy(password);
            debug!(client_id = %client.id, "Password login attempted for service client");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify(digest, password) {
            debug!(client_id = %client.id, "Login with wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        if client.suspended {
            debug!(client_id = %client.id, "Login for suspended client");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let issued = self
            .codec
            .issue(client.id, &client.groups, Some(self.session_ttl))?;
        info!(client_id = %client.id, "Client logged in");
        Ok(issued)
    }

    /// Replace a session token that is about to expire.
    ///
    /// The presented token must pass client-level authorization. It is
    /// only replaced inside the grace window before expiry; the new token
    /// keeps the subject and groups and gets a fresh lifetime.
    pub async fn refresh(&self, raw: Option<&str>) -> AppResult<IssuedToken> {
        let principal = self.engine.resolve(raw, AccessLevel::Client).await?;

        let Some(remaining) = principal.claims.remaining(Utc::now()) else {
            return Err(AppError::validation("Token does not expire"));
        };
        if remaining > self.refresh_grace {
            return Err(AppError::validation("Token still valid"));
        }

        let issued = self.codec.issue(
            principal.client.id,
            &principal.claims.groups,
            Some(self.session_ttl),
        )?;
        info!(client_id = %principal.client.id, "Session refreshed");
        Ok(issued)
    }
}
