//! Client registration, self-service, and administration.

pub mod admin;
pub mod service;

pub use admin::{AdminClientService, SuspensionReport};
pub use service::{ClientService, DeletionReport, NewService, NewUser, ServiceRegistration};
