//! Staged authentication and authorization of a single request.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use gatekeeper_core::error::AppError;
use gatekeeper_database::store::ClientStore;
use gatekeeper_entity::client::Client;

use super::rejection::Rejection;
use crate::jwt::{Claims, TokenCodec};
use crate::revocation::RevocationChannel;

/// Failure of a resolution stage.
///
/// `Rejected` is a verdict about the caller; `Internal` means a
/// collaborator failed and no verdict could be reached.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("request rejected: {0:?}")]
    Rejected(Rejection),
    #[error(transparent)]
    Internal(#[from] AppError),
}

impl From<Rejection> for AuthError {
    fn from(reason: Rejection) -> Self {
        Self::Rejected(reason)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Rejected(reason) => reason.into(),
            AuthError::Internal(e) => e,
        }
    }
}

/// Required permission level for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// Any live, non-suspended client.
    Client,
    /// Additionally a member of the `admin` group.
    Admin,
}

/// An authorized caller: the live store record and the presented claims.
#[derive(Debug, Clone)]
pub struct Principal {
    pub client: Client,
    pub claims: Claims,
}

/// Resolves a raw session token to an authorized [`Principal`].
///
/// Stages run in order and the first rejection ends resolution:
/// [`process_token`](Self::process_token) →
/// [`authenticate`](Self::authenticate) →
/// [`authorize`](Self::authorize) →
/// [`authorize_admin`](Self::authorize_admin).
///
/// Group checks use the groups on the freshly loaded store record, not the
/// snapshot inside the token, so removing a client from `admin` takes
/// effect on its next request.
#[derive(Debug, Clone)]
pub struct AuthEngine {
    codec: Arc<TokenCodec>,
    store: Arc<dyn ClientStore>,
    revocation: Arc<RevocationChannel>,
}

impl AuthEngine {
    /// Creates a new engine.
    pub fn new(
        codec: Arc<TokenCodec>,
        store: Arc<dyn ClientStore>,
        revocation: Arc<RevocationChannel>,
    ) -> Self {
        Self {
            codec,
            store,
            revocation,
        }
    }

    /// Decode the session cookie value. A missing token is
    /// `Unauthenticated`; codec failures keep their own reason.
    pub fn process_token(&self, raw: Option<&str>) -> Result<Claims, Rejection> {
        let raw = raw.ok_or(Rejection::Unauthenticated)?;
        self.codec.decode(raw).map_err(Rejection::from)
    }

    /// Load the claim's subject. Unknown, suspended, and revoked subjects
    /// are all rejected as `Unauthenticated`.
    ///
    /// A store or cache failure is an internal error: the request is
    /// refused without a verdict.
    pub async fn authenticate(&self, claims: &Claims) -> Result<Client, AuthError> {
        let id = claims.subject_id().ok_or(Rejection::Unauthenticated)?;

        let Some(client) = self.store.find_by_id(id).await? else {
            debug!(client_id = %id, "Token subject not found");
            return Err(Rejection::Unauthenticated.into());
        };

        if client.suspended {
            debug!(client_id = %id, "Token subject is suspended");
            return Err(Rejection::Unauthenticated.into());
        }

        let revoked = self.revocation.is_revoked(id).await.map_err(|e| {
            error!(client_id = %id, error = %e, "Revocation lookup failed");
            e
        })?;
        if revoked {
            debug!(client_id = %id, "Token subject has a revocation entry");
            return Err(Rejection::Unauthenticated.into());
        }

        Ok(client)
    }

    /// Client-level authorization.
    pub fn authorize(&self, client: Client) -> Result<Client, Rejection> {
        if client.suspended {
            return Err(Rejection::Unauthenticated);
        }
        Ok(client)
    }

    /// Admin-level authorization: exact, case-sensitive `admin` membership.
    pub fn authorize_admin(&self, client: Client) -> Result<Client, Rejection> {
        let client = self.authorize(client)?;
        if !client.is_admin() {
            debug!(client_id = %client.id, "Client is not an admin");
            return Err(Rejection::MissingGroup);
        }
        Ok(client)
    }

    /// Run every stage required for `level`.
    pub async fn resolve(
        &self,
        raw: Option<&str>,
        level: AccessLevel,
    ) -> Result<Principal, AuthError> {
        let claims = self.process_token(raw)?;
        let client = self.authenticate(&claims).await?;
        let client = match level {
            AccessLevel::Client => self.authorize(client)?,
            AccessLevel::Admin => self.authorize_admin(client)?,
        };
        Ok(Principal { client, claims })
    }
}
