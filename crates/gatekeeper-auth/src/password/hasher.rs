//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use gatekeeper_core::config::auth::AuthConfig;
use gatekeeper_core::error::AppError;
use gatekeeper_core::result::AppResult;

const DUMMY_PLAINTEXT: &str = "gatekeeper-unknown-account";

/// Hashes and verifies passwords using Argon2id.
///
/// Digests are PHC strings that embed salt and cost, so verification uses
/// the parameters a digest was created with, not the current ones.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    /// Digest verified against when the account does not exist, so the
    /// unknown-email path costs the same as a wrong password.
    dummy_digest: String,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("params", self.argon2.params())
            .finish()
    }
}

impl PasswordHasher {
    /// Creates a hasher with the configured, bounded cost parameters.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let (memory_kib, iterations, parallelism) = config.bounded_argon2_params();
        let params = Params::new(memory_kib, iterations, parallelism, None).map_err(|e| {
            AppError::configuration(format!("Invalid Argon2 parameters: {e}"))
        })?;

        let mut hasher = Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            dummy_digest: String::new(),
        };
        hasher.dummy_digest = hasher.hash(DUMMY_PLAINTEXT)?;
        Ok(hasher)
    }

    /// Hashes a plaintext password with a random salt.
    pub fn hash(&self, plaintext: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Checks a plaintext password against a stored digest.
    ///
    /// A malformed digest verifies as `false`. The final comparison is
    /// constant-time.
    pub fn verify(&self, digest: &str, plaintext: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };
        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }

    /// Spend one verification on the dummy digest and discard the result.
    pub fn verify_dummy(&self, plaintext: &str) {
        std::hint::black_box(self.verify(&self.dummy_digest, plaintext));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        let config = AuthConfig {
            argon2_memory_kib: 1024,
            argon2_iterations: 1,
            ..AuthConfig::default()
        };
        PasswordHasher::new(&config).expect("valid params")
    }

    #[test]
    fn hash_then_verify_round_trips() {
        let hasher = hasher();
        let digest = hasher.hash("pw12345!").expect("hash");

        assert!(digest.starts_with("$argon2id$"));
        assert!(hasher.verify(&digest, "pw12345!"));
        assert!(!hasher.verify(&digest, "pw12345?"));
        assert!(!hasher.verify(&digest, ""));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let hasher = hasher();
        let a = hasher.hash("correct horse").expect("hash");
        let b = hasher.hash("correct horse").expect("hash");
        assert_ne!(a, b);
        assert!(hasher.verify(&a, "correct horse"));
        assert!(hasher.verify(&b, "correct horse"));
    }

    #[test]
    fn malformed_digest_is_false_not_error() {
        let hasher = hasher();
        assert!(!hasher.verify("not-a-phc-string", "pw12345!"));
        assert!(!hasher.verify("", "pw12345!"));
    }

    #[test]
    fn digest_from_other_params_still_verifies() {
        let strong = PasswordHasher::new(&AuthConfig {
            argon2_memory_kib: 2048,
            argon2_iterations: 2,
            ..AuthConfig::default()
        })
        .expect("valid params");
        let digest = strong.hash("pw12345!").expect("hash");
        assert!(hasher().verify(&digest, "pw12345!"));
    }

    #[test]
    fn dummy_digest_is_a_real_digest() {
        let hasher = hasher();
        assert!(hasher.dummy_digest.starts_with("$argon2id$"));
        assert!(hasher.verify(&hasher.dummy_digest, DUMMY_PLAINTEXT));
    }
}
