//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod session;

pub use auth::{AdminClient, AuthClient};
pub use json::ValidatedJson;
pub use session::SessionToken;
