//! # gatekeeper-database
//!
//! The [`ClientStore`] contract and its implementations: PostgreSQL via
//! sqlx for deployments, and an in-memory map for tests and local runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::connect_pool;
pub use memory::MemoryClientStore;
pub use repositories::client::PgClientStore;
pub use store::ClientStore;
