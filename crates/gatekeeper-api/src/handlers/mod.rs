//! Route handlers organized by domain.

pub mod admin;
pub mod client;
pub mod health;
pub mod registration;
pub mod session;
