//! # gatekeeper-entity
//!
//! Domain model for Gatekeeper clients. A [`client::Client`] is either a
//! human user or a programmatic service; the variant is carried explicitly
//! by [`client::ClientKind`] and mapped to the flat `clients` table row by
//! [`client::ClientRow`].

pub mod client;
pub mod group;
