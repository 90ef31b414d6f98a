//! # gatekeeper-api
//!
//! HTTP API layer for Gatekeeper built on Axum.
//!
//! Provides the registration, session, self-service, and admin endpoints,
//! the session cookie and authentication extractors, DTOs, and error
//! mapping.

pub mod app;
pub mod cookie;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
