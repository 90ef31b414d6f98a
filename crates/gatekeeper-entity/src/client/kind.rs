//! Human/service discriminant for clients.

/// Kind-specific client data.
///
/// A human always has a password digest and a service never does, so a
/// password-less human cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientKind {
    /// A person who logs in with email and password.
    Human {
        /// Given name.
        first_name: String,
        /// Family name.
        last_name: String,
        /// Self-describing password digest.
        hashed_password: String,
    },
    /// A programmatic client holding a non-expiring token.
    Service {
        /// Display name of the service.
        name: String,
    },
}

impl ClientKind {
    /// Stable discriminant used by the persistence layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human { .. } => "human",
            Self::Service { .. } => "service",
        }
    }
}
