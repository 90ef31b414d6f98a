//! Raw session token from the request cookies.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Cookie;

use crate::state::AppState;

/// The session cookie value, if the request carries a non-empty one.
#[derive(Debug, Clone, Default)]
pub struct SessionToken(pub Option<String>);

impl SessionToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // An unparseable Cookie header is treated like a missing one.
        let cookies = Option::<TypedHeader<Cookie>>::from_request_parts(parts, state)
            .await
            .ok()
            .flatten();

        let token = cookies
            .as_ref()
            .and_then(|TypedHeader(cookies)| cookies.get(state.cookie.name()))
            .filter(|value| !value.is_empty())
            .map(str::to_owned);

        Ok(Self(token))
    }
}
