//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gatekeeper_auth::SideEffect;
use gatekeeper_auth::revocation::SideEffectSnapshot;
use gatekeeper_entity::client::{Client, ClientKind};
use gatekeeper_service::{DeletionReport, SuspensionReport};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// A client record as shown to callers. Never includes the password digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub id: Uuid,
    pub email: String,
    pub groups: Vec<String>,
    pub suspended: bool,
    /// `human` or `service`.
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Client> for ClientResponse {
    fn from(client: &Client) -> Self {
        let (first_name, last_name, name) = match &client.kind {
            ClientKind::Human {
                first_name,
                last_name,
                ..
            } => (Some(first_name.clone()), Some(last_name.clone()), None),
            ClientKind::Service { name } => (None, None, Some(name.clone())),
        };
        Self {
            id: client.id,
            email: client.email.clone(),
            groups: client.groups.clone(),
            suspended: client.suspended,
            kind: client.kind.as_str().to_string(),
            first_name,
            last_name,
            name,
            created_at: client.created_at,
        }
    }
}

/// Service registration result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRegistrationResponse {
    pub client: ClientResponse,
    /// Non-expiring session token.
    pub service_token: String,
}

/// Login and refresh result. The token itself travels in the cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub expires_at: Option<DateTime<Utc>>,
}

/// Self-delete result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionResponse {
    pub id: Uuid,
    pub removed: bool,
    pub broadcast: SideEffect,
    pub revocation: SideEffect,
}

impl From<DeletionReport> for DeletionResponse {
    fn from(report: DeletionReport) -> Self {
        Self {
            id: report.client_id,
            removed: report.removed,
            broadcast: report.broadcast,
            revocation: report.revocation,
        }
    }
}

/// Suspension result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspensionResponse {
    pub id: Uuid,
    pub revocation: SideEffect,
}

impl From<SuspensionReport> for SuspensionResponse {
    fn from(report: SuspensionReport) -> Self {
        Self {
            id: report.client_id,
            revocation: report.revocation,
        }
    }
}

/// Collaborator reachability and side-effect counters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    pub version: String,
    pub store: bool,
    pub cache: bool,
    pub side_effects: SideEffectSnapshot,
}
