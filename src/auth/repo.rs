use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub last_login: Option<OffsetDateTime>,
    pub is_verified: bool,
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,
    pub verification_token_expires_at: Option<OffsetDateTime>,
    #[serde(skip_serializing)]
    pub reset_password_token: Option<String>,
    pub reset_password_expires_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

const USER_COLUMNS: &str = r#"
    id, name, email, password_hash, last_login, is_verified,
    verification_token, verification_token_expires_at,
    reset_password_token, reset_password_expires_at,
    created_at, updated_at
"#;

impl User {
    /// Find a user by email. `None` means no such user; `Err` means the
    /// store itself failed.
    pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Find by verification code, skipping codes past their expiry.
    pub async fn find_by_verification_token(db: &PgPool, token: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS} FROM users
            WHERE verification_token = $1
              AND verification_token_expires_at > NOW()
            "#
        ))
        .bind(token)
        .fetch_optional(db)
        .await
    }

    /// Find by reset token, skipping tokens past their expiry.
    pub async fn find_by_reset_token(db: &PgPool, token: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS} FROM users
            WHERE reset_password_token = $1
              AND reset_password_expires_at > NOW()
            "#
        ))
        .bind(token)
        .fetch_optional(db)
        .await
    }

    /// Create a new unverified user. A duplicate name or email surfaces as a
    /// unique-index violation from the database.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        verification_token: &str,
        verification_token_expires_at: OffsetDateTime,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, verification_token, verification_token_expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(verification_token)
        .bind(verification_token_expires_at)
        .fetch_one(db)
        .await
    }

    /// Mark the user verified and consume the verification code.
    pub async fn mark_verified(db: &PgPool, id: Uuid) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET is_verified = TRUE,
                verification_token = NULL,
                verification_token_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_one(db)
        .await
    }

    pub async fn touch_last_login(db: &PgPool, id: Uuid) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET last_login = NOW(), updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_one(db)
        .await
    }

    pub async fn set_reset_token(
        db: &PgPool,
        id: Uuid,
        token: &str,
        expires_at: OffsetDateTime,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET reset_password_token = $2,
                reset_password_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(token)
        .bind(expires_at)
        .fetch_one(db)
        .await
    }

    /// Replace the password hash and consume the reset token.
    pub async fn set_password(db: &PgPool, id: Uuid, password_hash: &str) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET password_hash = $2,
                reset_password_token = NULL,
                reset_password_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }
}
