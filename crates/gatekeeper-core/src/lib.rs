//! # gatekeeper-core
//!
//! Core crate for Gatekeeper. Contains configuration schemas, the unified
//! error system, the cache/pub-sub provider contract, and the startup
//! retry policy.
//!
//! This crate has **no** internal dependencies on other Gatekeeper crates.

pub mod config;
pub mod error;
pub mod redact;
pub mod result;
pub mod retry;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
