//! Revocation side-channel: blacklist entries and deletion broadcasts.

pub mod channel;
pub mod metrics;

pub use channel::{RevocationChannel, SideEffect};
pub use metrics::{SideEffectMetrics, SideEffectSnapshot};
