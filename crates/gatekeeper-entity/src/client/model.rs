//! Client entity model.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::kind::ClientKind;
use crate::group::{ADMIN_GROUP, SERVICE_GROUP, normalize_groups};

/// A registered principal: a human user or a programmatic service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    /// Unique, immutable identifier.
    pub id: Uuid,
    /// Unique email address, stored lower-cased.
    pub email: String,
    /// Flat role tags.
    pub groups: Vec<String>,
    /// Suspended clients cannot start or continue sessions.
    pub suspended: bool,
    /// When the client registered.
    pub created_at: DateTime<Utc>,
    /// Human or service specific data.
    pub kind: ClientKind,
}

impl Client {
    /// Build a new human client with a freshly assigned id.
    pub fn new_human(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        hashed_password: impl Into<String>,
        groups: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            email: normalize_email(&email.into()),
            groups: normalize_groups(groups),
            suspended: false,
            created_at: Utc::now(),
            kind: ClientKind::Human {
                first_name: first_name.into(),
                last_name: last_name.into(),
                hashed_password: hashed_password.into(),
            },
        }
    }

    /// Build a new service client. The `service` marker group is appended
    /// when absent.
    pub fn new_service(email: impl Into<String>, name: impl Into<String>, groups: Vec<String>) -> Self {
        let mut groups = normalize_groups(groups);
        if !groups.iter().any(|g| g == SERVICE_GROUP) {
            groups.push(SERVICE_GROUP.to_string());
        }
        Self {
            id: Uuid::now_v7(),
            email: normalize_email(&email.into()),
            groups,
            suspended: false,
            created_at: Utc::now(),
            kind: ClientKind::Service { name: name.into() },
        }
    }

    /// Password digest, present only for humans.
    pub fn hashed_password(&self) -> Option<&str> {
        match &self.kind {
            ClientKind::Human {
                hashed_password, ..
            } => Some(hashed_password),
            ClientKind::Service { .. } => None,
        }
    }

    /// Whether this is a service client.
    pub fn is_service(&self) -> bool {
        matches!(self.kind, ClientKind::Service { .. })
    }

    /// Exact, case-sensitive group membership test.
    pub fn has_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// Whether the client belongs to the `admin` group.
    pub fn is_admin(&self) -> bool {
        self.has_group(ADMIN_GROUP)
    }
}

/// Canonical form used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
