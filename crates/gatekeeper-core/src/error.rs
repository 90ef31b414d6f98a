//! The error type shared by every Gatekeeper crate.

use std::fmt;
use thiserror::Error;

/// What went wrong, coarsely. The HTTP layer maps each kind to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No record with the given identity.
    NotFound,
    /// Authentication failed (missing, invalid or expired token, bad credentials).
    Authentication,
    /// The caller is authenticated but lacks a required group.
    Authorization,
    /// The request was malformed or violated a field constraint.
    Validation,
    /// A conflict occurred (duplicate email).
    Conflict,
    /// A bug or broken invariant on our side.
    Internal,
    /// A credential store error occurred.
    Database,
    /// A cache or pub/sub error occurred.
    Cache,
    /// Missing or inconsistent settings.
    Configuration,
    /// A collaborator is down; retrying later may succeed.
    ServiceUnavailable,
}

impl ErrorKind {
    /// Stable machine-readable code, used as the `error` field of HTTP
    /// error bodies.
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Authentication => "AUTHENTICATION",
            Self::Authorization => "AUTHORIZATION",
            Self::Validation => "VALIDATION",
            Self::Conflict => "CONFLICT",
            Self::Internal => "INTERNAL",
            Self::Database => "DATABASE",
            Self::Cache => "CACHE",
            Self::Configuration => "CONFIGURATION",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// Faults on our side. Their messages stay in the logs.
    pub const fn is_server_fault(self) -> bool {
        matches!(
            self,
            Self::Internal | Self::Database | Self::Cache | Self::Configuration
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A categorized error with a caller-facing message and an optional cause.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    pub kind: ErrorKind,
    /// Safe to show callers unless `kind` is a server fault.
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Like [`AppError::new`], keeping `source` as the error's cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cache, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = AppError::conflict("An account with that email address is already registered");
        assert_eq!(
            err.to_string(),
            "CONFLICT: An account with that email address is already registered"
        );
    }

    #[test]
    fn clone_drops_source() {
        let source = std::io::Error::other("connection reset");
        let err = AppError::with_source(ErrorKind::Cache, "Redis SET failed", source);
        assert!(err.source.is_some());

        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::Cache);
        assert!(cloned.source.is_none());
    }

    #[test]
    fn server_faults_are_classified() {
        assert!(ErrorKind::Database.is_server_fault());
        assert!(ErrorKind::Cache.is_server_fault());
        assert!(!ErrorKind::Authentication.is_server_fault());
        assert!(!ErrorKind::Conflict.is_server_fault());
    }
}
