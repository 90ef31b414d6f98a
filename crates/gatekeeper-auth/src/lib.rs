//! # gatekeeper-auth
//!
//! Authentication and session handling for Gatekeeper.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing with bounded cost
//! - `jwt`: HS256 session token issuance and decoding
//! - `engine`: staged token → identity → permission resolution
//! - `revocation`: blacklist entries and deletion broadcasts
//! - `session`: login and refresh

pub mod engine;
pub mod jwt;
pub mod password;
pub mod revocation;
pub mod session;

pub use engine::{AccessLevel, AuthEngine, AuthError, Principal, Rejection, rejection_status};
pub use jwt::{Claims, IssuedToken, TokenCodec, TokenError};
pub use password::PasswordHasher;
pub use revocation::{RevocationChannel, SideEffect, SideEffectMetrics};
pub use session::SessionManager;
