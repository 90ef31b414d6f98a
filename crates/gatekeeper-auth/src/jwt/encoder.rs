//! Session token creation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use gatekeeper_core::config::auth::AuthConfig;
use gatekeeper_core::error::AppError;

use super::claims::Claims;

/// A freshly signed token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// The `iat` instant, truncated to whole seconds.
    pub issued_at: DateTime<Utc>,
    /// When the token expires; `None` for non-expiring tokens.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Signs session tokens with the server's HMAC secret.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        }
    }

    /// Signs a token for `subject`. Without a `ttl` the token carries no
    /// `exp` claim and never expires.
    pub fn issue(
        &self,
        subject: Uuid,
        groups: &[String],
        ttl: Option<chrono::Duration>,
    ) -> Result<IssuedToken, AppError> {
        let now = whole_seconds(Utc::now());
        let expires_at = ttl.map(|ttl| now + ttl);

        let claims = Claims {
            subject: subject.to_string(),
            groups: groups.to_vec(),
            iat: now.timestamp(),
            exp: expires_at.map(|exp| exp.timestamp()),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Unable to sign token: {e}")))?;

        Ok(IssuedToken {
            token,
            issued_at: now,
            expires_at,
        })
    }
}

/// Drops the sub-second part so `issued_at`/`expires_at` equal the
/// `iat`/`exp` claims exactly.
fn whole_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(at.timestamp(), 0).unwrap_or(at)
}
