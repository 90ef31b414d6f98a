//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use gatekeeper_core::traits::cache::CacheProvider;
use gatekeeper_database::store::ClientStore;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
///
/// 200 when both the store and the cache answer, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store = state.store.health_check().await.unwrap_or_else(|e| {
        warn!(error = %e, "Store health check failed");
        false
    });
    let cache = state.cache.health_check().await.unwrap_or_else(|e| {
        warn!(error = %e, "Cache health check failed");
        false
    });

    let healthy = store && cache;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store,
            cache,
            side_effects: state.revocation.metrics().snapshot(),
        }),
    )
}
