//! Token → identity → permission resolution.

pub mod rejection;
pub mod resolver;

pub use rejection::{Rejection, rejection_status};
pub use resolver::{AccessLevel, AuthEngine, AuthError, Principal};
