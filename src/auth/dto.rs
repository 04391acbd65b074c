use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::User;

/// Request body for signup. Fields are optional so presence can be checked
/// explicitly instead of bouncing at the deserializer.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for email verification.
#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

/// Public part of the user returned to the client. The projection is the
/// only way a user leaves the store boundary: no hash, no one-time tokens.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login: Option<OffsetDateTime>,
    pub is_verified: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            last_login: user.last_login,
            is_verified: user.is_verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Response returned after signup.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user: PublicUser,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: PublicUser,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct VerifyEmailResponse {
    pub success: bool,
    pub message: &'static str,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct CheckAuthResponse {
    pub success: bool,
    pub user: PublicUser,
}

/// `{success, message}` body shared by the reset-flow endpoints.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = time::macros::datetime!(2024-01-01 00:00 UTC);
        User {
            id: Uuid::new_v4(),
            name: "ann".into(),
            email: "ann@x.com".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            last_login: Some(now),
            is_verified: false,
            verification_token: Some("123456".into()),
            verification_token_expires_at: Some(now),
            reset_password_token: Some("deadbeef".into()),
            reset_password_expires_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn projection_redacts_secrets() {
        let public = PublicUser::from(sample_user());
        let json = serde_json::to_string(&public).unwrap();
        assert!(json.contains("ann@x.com"));
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
        assert!(!json.contains("123456"));
        assert!(!json.contains("deadbeef"));
    }

    #[test]
    fn user_record_never_serializes_its_hash() {
        // Belt and braces: even the raw record skips the secret columns.
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("verification_token\":"));
    }

    #[test]
    fn signup_response_shape() {
        let response = SignupResponse {
            message: "User created successfully",
            user: PublicUser::from(sample_user()),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["message"], "User created successfully");
        assert_eq!(json["user"]["name"], "ann");
        assert!(json["user"].get("password").is_none());
    }
}
