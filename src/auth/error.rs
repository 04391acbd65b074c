use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Everything a handler can fail with, mapped to a status and a short
/// client-facing message. Internal failures keep their source for the log
/// but never reach the response body.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Unauthorized request")]
    Unauthorized,
    #[error("Invalid or expired token")]
    InvalidSession,
    #[error("User already exists")]
    Duplicate,
    #[error("Server error")]
    Internal(#[source] anyhow::Error),
}

impl AuthError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::NotFound(_) | Self::Duplicate => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::InvalidSession => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let Self::Internal(source) = &self {
            error!(error = ?source, "request failed");
        }
        let body = Json(json!({ "success": false, "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        if is_unique_violation(&err) {
            Self::Duplicate
        } else {
            Self::Internal(err.into())
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            AuthError::Validation("All fields are required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::NotFound("Invalid credentials".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::Duplicate.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidSession.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_message_never_leaks_the_source() {
        let err = AuthError::Internal(anyhow::anyhow!("connection refused at 10.0.0.3"));
        assert_eq!(err.to_string(), "Server error");
    }

    #[test]
    fn sqlx_unique_violation_maps_to_duplicate() {
        struct FakeDbError {
            code: &'static str,
        }
        impl std::fmt::Debug for FakeDbError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "FakeDbError({})", self.code)
            }
        }
        impl std::fmt::Display for FakeDbError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "duplicate key value violates unique constraint")
            }
        }
        impl std::error::Error for FakeDbError {}
        impl sqlx::error::DatabaseError for FakeDbError {
            fn message(&self) -> &str {
                "duplicate key value violates unique constraint"
            }
            fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
                Some(std::borrow::Cow::Borrowed(self.code))
            }
            fn kind(&self) -> sqlx::error::ErrorKind {
                if self.code == "23505" {
                    sqlx::error::ErrorKind::UniqueViolation
                } else {
                    sqlx::error::ErrorKind::Other
                }
            }
            fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
                self
            }
            fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
                self
            }
            fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
                self
            }
        }

        let err = sqlx::Error::Database(Box::new(FakeDbError { code: "23505" }));
        assert!(matches!(AuthError::from(err), AuthError::Duplicate));

        let err = sqlx::Error::Database(Box::new(FakeDbError { code: "40001" }));
        assert!(matches!(AuthError::from(err), AuthError::Internal(_)));

        let err = sqlx::Error::RowNotFound;
        assert!(matches!(AuthError::from(err), AuthError::Internal(_)));
    }
}
