//! # gatekeeper-service
//!
//! Use cases built on the credential store and the auth crate. Services
//! follow constructor injection: every dependency is handed in as an
//! `Arc` when the service is built.

pub mod client;

pub use client::{AdminClientService, ClientService, DeletionReport, SuspensionReport};
