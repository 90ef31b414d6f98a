//! Rejection reasons and the single place they map to HTTP statuses.

use http::StatusCode;

use gatekeeper_core::error::{AppError, ErrorKind};

use crate::jwt::TokenError;

/// Why the engine refused a request.
///
/// Reasons are coarse by design: an unknown subject, a suspended client
/// and a revoked session are all `Unauthenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// No token, or the token does not identify a live, active client.
    Unauthenticated,
    /// A token was presented but could not be parsed.
    Malformed,
    /// The token signature did not verify.
    BadSignature,
    /// The token has expired.
    Expired,
    /// The client lacks a required group.
    MissingGroup,
}

/// Status code returned for each rejection reason.
pub fn rejection_status(reason: Rejection) -> StatusCode {
    match reason {
        Rejection::Malformed => StatusCode::BAD_REQUEST,
        Rejection::Unauthenticated | Rejection::BadSignature | Rejection::Expired => {
            StatusCode::UNAUTHORIZED
        }
        Rejection::MissingGroup => StatusCode::FORBIDDEN,
    }
}

impl Rejection {
    /// Caller-facing message; one per status category.
    pub fn message(&self) -> &'static str {
        match rejection_status(*self) {
            StatusCode::BAD_REQUEST => "Unable to process session token",
            StatusCode::FORBIDDEN => "You are not authorised to perform this action",
            _ => "Unauthorized",
        }
    }

    fn error_kind(&self) -> ErrorKind {
        match rejection_status(*self) {
            StatusCode::BAD_REQUEST => ErrorKind::Validation,
            StatusCode::FORBIDDEN => ErrorKind::Authorization,
            _ => ErrorKind::Authentication,
        }
    }
}

impl From<TokenError> for Rejection {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed => Self::Malformed,
            TokenError::BadSignature => Self::BadSignature,
            TokenError::Expired => Self::Expired,
        }
    }
}

impl From<Rejection> for AppError {
    fn from(reason: Rejection) -> Self {
        AppError::new(reason.error_kind(), reason.message())
    }
}
