//! Token decoding failures.

use thiserror::Error;

/// Why a token string could not be turned into [`Claims`](super::Claims).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not a JWT, or the payload has the wrong shape.
    #[error("malformed token")]
    Malformed,
    /// Signature did not verify, or the token names another algorithm.
    #[error("token signature verification failed")]
    BadSignature,
    /// Signature is valid but `exp` has passed.
    #[error("token expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => Self::BadSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Malformed,
        }
    }
}
