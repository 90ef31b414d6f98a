//! Claims carried by every session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token payload.
///
/// The subject is serialized as `id` and `exp` is omitted entirely for
/// non-expiring service tokens; the gateway reads both in this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the client id.
    #[serde(rename = "id")]
    pub subject: String,
    /// Group memberships at issuance time.
    #[serde(default)]
    pub groups: Vec<String>,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(default)]
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch), absent for service tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// The subject as a client id, if it is one.
    pub fn subject_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.subject).ok()
    }

    /// Expiration as a timestamp, if the token expires.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Time left before expiry at `now`, if the token expires.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<chrono::Duration> {
        self.expires_at().map(|exp| exp - now)
    }
}
