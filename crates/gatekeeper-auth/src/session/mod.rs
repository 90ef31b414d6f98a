//! Session lifecycle: login and refresh.

pub mod manager;

pub use manager::SessionManager;
