//! Cache keys and pub/sub topics shared with downstream consumers.
//!
//! These names are part of the contract with the gateway, which reads
//! revocation entries and listens on the deletion topic directly.

use uuid::Uuid;

/// Topic on which the id of every deleted client is published.
pub const DELETION_TOPIC: &str = "user-delete";

/// Revocation entry key for a subject: the bare subject id.
pub fn revocation(subject_id: Uuid) -> String {
    subject_id.to_string()
}
