//! Route definitions for the Gatekeeper HTTP API.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route and the shared state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(registration_routes())
        .merge(session_routes())
        .merge(client_routes())
        .merge(admin_routes())
        .merge(health_routes())
        .with_state(state)
}

/// Unauthenticated registration
fn registration_routes() -> Router<AppState> {
    Router::new()
        .route("/register-user", post(handlers::registration::register_user))
        .route(
            "/register-service",
            post(handlers::registration::register_service),
        )
}

/// Login, refresh, logout
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::session::login))
        .route(
            "/refresh-user-token",
            get(handlers::session::refresh).post(handlers::session::refresh),
        )
        .route("/logout", post(handlers::session::logout))
}

/// Authenticated self-service
fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::client::me))
        .route("/delete", post(handlers::client::delete))
}

/// Admin-only
fn admin_routes() -> Router<AppState> {
    Router::new().route("/suspend", post(handlers::admin::suspend))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
