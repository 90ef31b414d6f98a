//! Session handlers: login, refresh, logout.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::header::SET_COOKIE;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, SessionResponse};
use crate::error::ApiError;
use crate::extractors::{SessionToken, ValidatedJson};
use crate::state::AppState;

type WithCookie<T> = ([(HeaderName, String); 1], Json<ApiResponse<T>>);

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<WithCookie<SessionResponse>, ApiError> {
    let issued = state.sessions.login(&req.email, &req.password).await?;

    let cookie = state.cookie.issue(&issued);
    Ok((
        [(SET_COOKIE, cookie)],
        Json(ApiResponse::ok(
            "Logged in",
            SessionResponse {
                expires_at: issued.expires_at,
            },
        )),
    ))
}

/// GET|POST /refresh-user-token
pub async fn refresh(
    State(state): State<AppState>,
    token: SessionToken,
) -> Result<WithCookie<SessionResponse>, ApiError> {
    let issued = state.sessions.refresh(token.as_deref()).await?;

    let cookie = state.cookie.issue(&issued);
    Ok((
        [(SET_COOKIE, cookie)],
        Json(ApiResponse::ok(
            "Session refreshed",
            SessionResponse {
                expires_at: issued.expires_at,
            },
        )),
    ))
}

/// POST /logout
///
/// Only overwrites the cookie. A copied token stays usable until it
/// expires.
pub async fn logout(State(state): State<AppState>) -> WithCookie<()> {
    (
        [(SET_COOKIE, state.cookie.clear())],
        Json(ApiResponse::ok("Logged out", ())),
    )
}
