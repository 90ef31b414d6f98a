//! `AuthClient` and `AdminClient` extractors: resolve the session cookie to
//! an authorized principal.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use gatekeeper_auth::{AccessLevel, Principal};

use super::session::SessionToken;
use crate::error::ApiError;
use crate::state::AppState;

/// Any live, non-suspended client.
#[derive(Debug, Clone)]
pub struct AuthClient(pub Principal);

/// A live, non-suspended member of the `admin` group.
#[derive(Debug, Clone)]
pub struct AdminClient(pub Principal);

impl std::ops::Deref for AuthClient {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::Deref for AdminClient {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

async fn resolve(
    parts: &mut Parts,
    state: &AppState,
    level: AccessLevel,
) -> Result<Principal, ApiError> {
    let Ok(token) = SessionToken::from_request_parts(parts, state).await;
    let principal = state.engine.resolve(token.as_deref(), level).await?;
    Ok(principal)
}

impl FromRequestParts<AppState> for AuthClient {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve(parts, state, AccessLevel::Client).await.map(Self)
    }
}

impl FromRequestParts<AppState> for AdminClient {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve(parts, state, AccessLevel::Admin).await.map(Self)
    }
}
