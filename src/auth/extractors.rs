use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::errors::ErrorKind;
use tracing::warn;
use uuid::Uuid;

use crate::auth::error::AuthError;
use crate::auth::jwt::JwtKeys;

/// Name of the HTTP-only cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

pub fn session_cookie(token: String, ttl: std::time::Duration) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(ttl.as_secs() as i64))
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookie
}

/// Extracts and validates the session cookie, returning the user ID.
/// Never touches the store; a stale ID is the handler's problem.
#[derive(Debug)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(AuthError::Unauthorized)?;

        let keys = JwtKeys::from_ref(state);
        match keys.verify(&token) {
            Ok(claims) => Ok(AuthUser(claims.sub)),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature
                | ErrorKind::ImmatureSignature
                | ErrorKind::InvalidToken
                | ErrorKind::InvalidSignature
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => {
                    warn!("invalid or expired session token");
                    Err(AuthError::InvalidSession)
                }
                _ => Err(AuthError::Internal(e.into())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::http::{header, Request};
    use time::{Duration as TimeDuration, OffsetDateTime};

    fn parts_with_cookie(cookie: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/check-auth");
        if let Some(value) = cookie {
            builder = builder.header(header::COOKIE, value);
        }
        let (parts, ()) = builder.body(()).expect("request").into_parts();
        parts
    }

    #[tokio::test]
    async fn missing_cookie_is_unauthorized() {
        let state = AppState::fake();
        let mut parts = parts_with_cookie(None);
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let state = AppState::fake();
        let mut parts = parts_with_cookie(Some("token=garbage"));
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidSession));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let now = OffsetDateTime::now_utc();
        let claims = crate::auth::jwt::Claims {
            sub: Uuid::new_v4(),
            iat: (now - TimeDuration::hours(2)).unix_timestamp() as usize,
            exp: (now - TimeDuration::hours(1)).unix_timestamp() as usize,
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &keys.encoding,
        )
        .expect("encode");
        let mut parts = parts_with_cookie(Some(&format!("token={token}")));
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidSession));
    }

    #[tokio::test]
    async fn valid_session_resolves_to_user_id() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let user_id = Uuid::new_v4();
        let token = keys.sign_session(user_id).expect("sign session");
        let mut parts = parts_with_cookie(Some(&format!("token={token}")));
        let AuthUser(extracted) = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .expect("extract");
        assert_eq!(extracted, user_id);
    }

    #[test]
    fn session_cookie_is_http_only_and_scoped() {
        let cookie = session_cookie("abc".into(), std::time::Duration::from_secs(604_800));
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
    }
}
