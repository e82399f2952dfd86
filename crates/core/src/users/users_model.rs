//! User domain models.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{EMAIL_MAX_LEN, USERNAME_MAX_LEN};
use crate::credentials::PasswordHash;
use crate::errors::{Result, ValidationError};
use crate::utils::validation::{require_max_len, require_non_empty};

/// Domain model representing a stored user.
///
/// Deliberately not `Serialize`: the credential must never leave the
/// service layer. Use [`UserProfile`] for anything outward facing.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub created_at: NaiveDateTime,
}

/// Public projection of a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Input model for persisting a new user. The credential is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: PasswordHash,
}

/// Full replacement of the mutable user fields.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub username: String,
    pub email: String,
    pub password_hash: PasswordHash,
}

/// Registration payload carrying the plaintext secret.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewUserRequest {
    /// Validates the registration data.
    pub fn validate(&self) -> Result<()> {
        validate_profile_fields(&self.username, &self.email, &self.password)
    }
}

impl fmt::Debug for NewUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Profile update payload. Every field is replaced.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl UpdateUserRequest {
    /// Validates the update data.
    pub fn validate(&self) -> Result<()> {
        validate_profile_fields(&self.username, &self.email, &self.password)
    }
}

impl fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Login payload.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn validate_profile_fields(username: &str, email: &str, password: &str) -> Result<()> {
    require_non_empty("username", username)?;
    require_max_len("username", username.trim(), USERNAME_MAX_LEN)?;
    require_non_empty("email", email)?;
    require_max_len("email", email.trim(), EMAIL_MAX_LEN)?;
    if !email.contains('@') {
        return Err(ValidationError::InvalidInput(format!(
            "'{}' is not an email address",
            email
        ))
        .into());
    }
    if password.is_empty() {
        return Err(ValidationError::MissingField("password".to_string()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn request(username: &str, email: &str, password: &str) -> NewUserRequest {
        NewUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(request("ada", "ada@example.com", "pw").validate().is_ok());
    }

    #[test]
    fn test_registration_rejects_bad_fields() {
        assert!(matches!(
            request("", "ada@example.com", "pw").validate(),
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
        assert!(matches!(
            request(&"a".repeat(101), "ada@example.com", "pw").validate(),
            Err(Error::Validation(ValidationError::TooLong { field: "username", .. }))
        ));
        assert!(matches!(
            request("ada", "not-an-email", "pw").validate(),
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
        assert!(matches!(
            request("ada", "ada@example.com", "").validate(),
            Err(Error::Validation(ValidationError::MissingField(f))) if f == "password"
        ));
    }

    #[test]
    fn test_debug_never_prints_password() {
        let debug = format!("{:?}", request("ada", "ada@example.com", "hunter2"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_profile_serializes_without_credential() {
        let profile = UserProfile {
            id: 1,
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            created_at: chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00");
        assert!(json.get("passwordHash").is_none());
    }
}
