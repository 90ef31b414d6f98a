//! Paired encoder and decoder sharing one signing key.

use uuid::Uuid;

use gatekeeper_core::config::auth::AuthConfig;
use gatekeeper_core::error::AppError;

use super::claims::Claims;
use super::decoder::JwtDecoder;
use super::encoder::{IssuedToken, JwtEncoder};
use super::error::TokenError;

/// Issues and decodes session tokens.
///
/// Built once from configuration; rotating the secret invalidates every
/// outstanding token.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl TokenCodec {
    /// Creates a codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
        }
    }

    /// See [`JwtEncoder::issue`].
    pub fn issue(
        &self,
        subject: Uuid,
        groups: &[String],
        ttl: Option<chrono::Duration>,
    ) -> Result<IssuedToken, AppError> {
        self.encoder.issue(subject, groups, ttl)
    }

    /// See [`JwtDecoder::decode`].
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        self.decoder.decode(token)
    }
}
