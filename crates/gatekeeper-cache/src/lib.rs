//! # gatekeeper-cache
//!
//! Cache and pub/sub provider implementations for Gatekeeper. Supports two
//! modes:
//!
//! - **memory**: In-process map with expiring entries and broadcast topics
//! - **redis**: Redis-backed, using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
