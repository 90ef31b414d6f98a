//! Admin-only handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::SuspendRequest;
use crate::dto::response::{ApiResponse, SuspensionResponse};
use crate::error::ApiError;
use crate::extractors::{AdminClient, ValidatedJson};
use crate::state::AppState;

/// POST /suspend
pub async fn suspend(
    State(state): State<AppState>,
    admin: AdminClient,
    ValidatedJson(req): ValidatedJson<SuspendRequest>,
) -> Result<Json<ApiResponse<SuspensionResponse>>, ApiError> {
    let report = state.admin.suspend_client(&admin.client, req.id).await?;

    Ok(Json(ApiResponse::ok(
        "Client suspended",
        SuspensionResponse::from(report),
    )))
}
