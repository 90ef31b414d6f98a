//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Human user registration body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, max = 64, message = "Password must be 8 to 64 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    /// Requested groups; required, may be empty.
    pub groups: Vec<String>,
}

/// Service client registration body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterServiceRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Requested groups; required, may be empty.
    pub groups: Vec<String>,
}

/// Login body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Suspension target.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuspendRequest {
    pub id: Uuid,
}

/// Strips surrounding whitespace so addresses validate the way they are
/// stored and looked up.
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: String = Deserialize::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_registration_uses_camel_case_names() {
        let req: RegisterUserRequest = serde_json::from_str(
            r#"{"email":"a@x.com","password":"pw12345!","firstName":"Ada","lastName":"Lovelace","groups":[]}"#,
        )
        .expect("parse");
        assert_eq!(req.first_name, "Ada");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn short_password_and_bad_email_fail_validation() {
        let req = RegisterUserRequest {
            email: "not-an-email".into(),
            password: "short".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            groups: vec![],
        };
        let errors = req.validate().expect_err("invalid");
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn padded_email_is_trimmed_before_validation() {
        let req: RegisterServiceRequest =
            serde_json::from_str(r#"{"email":"  S@X.com ","name":"svc","groups":[]}"#)
                .expect("parse");
        assert_eq!(req.email, "S@X.com");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn groups_are_required() {
        let parsed = serde_json::from_str::<RegisterServiceRequest>(
            r#"{"email":"s@x.com","name":"svc"}"#,
        );
        assert!(parsed.is_err());
    }
}
