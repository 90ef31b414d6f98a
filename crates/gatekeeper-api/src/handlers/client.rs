//! Authenticated self-service: profile and self-delete.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::header::SET_COOKIE;

use crate::dto::response::{ApiResponse, ClientResponse, DeletionResponse};
use crate::error::ApiError;
use crate::extractors::AuthClient;
use crate::state::AppState;

/// GET /me
pub async fn me(auth: AuthClient) -> Json<ApiResponse<ClientResponse>> {
    Json(ApiResponse::ok("OK", ClientResponse::from(&auth.client)))
}

/// POST /delete
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthClient,
) -> Result<([(HeaderName, String); 1], Json<ApiResponse<DeletionResponse>>), ApiError> {
    let report = state.clients.delete_client(auth.client.id).await?;

    Ok((
        [(SET_COOKIE, state.cookie.clear())],
        Json(ApiResponse::ok(
            "Account deleted",
            DeletionResponse::from(report),
        )),
    ))
}
