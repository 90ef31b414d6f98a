//! Concrete store implementations backed by PostgreSQL.

pub mod client;
