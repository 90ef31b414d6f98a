//! `Set-Cookie` values for the session token.

use gatekeeper_auth::IssuedToken;
use gatekeeper_core::config::auth::AuthConfig;

const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";
const EPOCH_EXPIRES: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Builds session cookie header values from auth configuration.
///
/// Cookies are always `HttpOnly` and `SameSite=Lax`, scoped to the
/// configured path. A token without expiry yields a cookie without
/// `Expires`/`Max-Age`.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    path: String,
    secure: bool,
}

impl SessionCookie {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            path: config.cookie_path.clone(),
            secure: config.cookie_secure,
        }
    }

    /// Cookie name the session token travels under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cookie carrying `token`, expiring with it. `Max-Age` is the
    /// token's `exp - iat`.
    pub fn issue(&self, token: &IssuedToken) -> String {
        let mut cookie = self.base(&token.token);
        if let Some(expires_at) = token.expires_at {
            let max_age = (expires_at.timestamp() - token.issued_at.timestamp()).max(0);
            cookie.push_str(&format!(
                "; Expires={}; Max-Age={max_age}",
                expires_at.format(EXPIRES_FORMAT)
            ));
        }
        cookie
    }

    /// An already-expired, empty cookie that overwrites the session.
    pub fn clear(&self) -> String {
        let mut cookie = self.base("");
        cookie.push_str(&format!("; Expires={EPOCH_EXPIRES}; Max-Age=0"));
        cookie
    }

    fn base(&self, value: &str) -> String {
        let mut cookie = format!(
            "{}={value}; Path={}; HttpOnly; SameSite=Lax",
            self.name, self.path
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn cookie(secure: bool) -> SessionCookie {
        SessionCookie::from_config(&AuthConfig {
            cookie_secure: secure,
            ..AuthConfig::default()
        })
    }

    #[test]
    fn expiring_token_sets_expires_and_max_age() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let token = IssuedToken {
            token: "abc.def.ghi".into(),
            issued_at: now,
            expires_at: Some(now + Duration::minutes(15)),
        };

        assert_eq!(
            cookie(false).issue(&token),
            "token=abc.def.ghi; Path=/; HttpOnly; SameSite=Lax; \
             Expires=Mon, 19 Oct 2026 12:15:00 GMT; Max-Age=900"
        );
    }

    #[test]
    fn non_expiring_token_sets_session_cookie() {
        let token = IssuedToken {
            token: "abc".into(),
            issued_at: Utc::now(),
            expires_at: None,
        };
        let value = cookie(true).issue(&token);
        assert_eq!(value, "token=abc; Path=/; HttpOnly; SameSite=Lax; Secure");
    }

    #[test]
    fn max_age_ignores_sub_second_drift() {
        let issued_at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 19, 50).unwrap()
            + Duration::milliseconds(999);
        let token = IssuedToken {
            token: "abc".into(),
            issued_at,
            expires_at: Some(issued_at + Duration::seconds(900)),
        };
        assert!(cookie(false).issue(&token).ends_with("Max-Age=900"));
    }

    #[test]
    fn clear_expires_immediately() {
        let value = cookie(false).clear();
        assert!(value.starts_with("token=; Path=/; HttpOnly"));
        assert!(value.ends_with("Max-Age=0"));
    }
}
