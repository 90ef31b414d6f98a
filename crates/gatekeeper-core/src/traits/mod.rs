//! Core traits defined in `gatekeeper-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
