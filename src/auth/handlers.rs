use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            CheckAuthResponse, ForgotPasswordRequest, LoginRequest, LoginResponse, LogoutResponse,
            PublicUser, ResetPasswordRequest, SignupRequest, SignupResponse, StatusResponse,
            VerifyEmailRequest, VerifyEmailResponse,
        },
        error::AuthError,
        extractors::{clear_session_cookie, session_cookie, AuthUser},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::User,
        tokens,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/check-auth", get(check_auth))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/verify-email", post(verify_email))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password/:token", post(reset_password))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn issue_session(state: &AppState, jar: CookieJar, user_id: uuid::Uuid) -> Result<CookieJar, AuthError> {
    let keys = JwtKeys::from_ref(state);
    let token = keys.sign_session(user_id)?;
    Ok(jar.add(session_cookie(token, keys.session_ttl)))
}

#[instrument(skip(state, jar, payload))]
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<SignupResponse>), AuthError> {
    let name = payload.name.as_deref().unwrap_or("").trim().to_string();
    let email = payload
        .email
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    let password = payload.password.unwrap_or_default();

    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AuthError::Validation("All fields are required".into()));
    }
    if name.len() < 3 {
        return Err(AuthError::Validation(
            "Name must be at least 3 characters".into(),
        ));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AuthError::Validation("Invalid email".into()));
    }
    if password.len() < 6 {
        return Err(AuthError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(email = %email, "signup for existing email");
        return Err(AuthError::Duplicate);
    }

    let hash = hash_password(&password)?;
    let code = tokens::generate_verification_code();
    let user = User::create(
        &state.db,
        &name,
        &email,
        &hash,
        &code,
        tokens::verification_code_expiry(),
    )
    .await?;

    let jar = issue_session(&state, jar, user.id)?;

    state
        .mailer
        .send_verification_email(&user.email, &code)
        .await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        jar,
        Json(SignupResponse {
            message: "User created successfully",
            user: PublicUser::from(user),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn verify_email(
    State(state): State<AppState>,
    Json(payload): Json<VerifyEmailRequest>,
) -> Result<Json<VerifyEmailResponse>, AuthError> {
    let user = User::find_by_verification_token(&state.db, payload.code.trim())
        .await?
        .ok_or_else(|| {
            warn!("verification code unknown or expired");
            AuthError::NotFound("Invalid verification code".into())
        })?;

    let user = User::mark_verified(&state.db, user.id).await?;

    state
        .mailer
        .send_welcome_email(&user.email, &user.name)
        .await?;

    info!(user_id = %user.id, email = %user.email, "email verified");
    Ok(Json(VerifyEmailResponse {
        success: true,
        message: "Email verified successfully",
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AuthError> {
    let email = payload.email.trim().to_lowercase();

    // Unknown email and wrong password produce the same response.
    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| {
            warn!(email = %email, "login unknown email");
            AuthError::NotFound("Invalid credentials".into())
        })?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AuthError::NotFound("Invalid credentials".into()));
    }

    let jar = issue_session(&state, jar, user.id)?;
    let user = User::touch_last_login(&state.db, user.id).await?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok((
        jar,
        Json(LoginResponse {
            success: true,
            user: PublicUser::from(user),
            message: "User logged in",
        }),
    ))
}

#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let jar = jar.remove(clear_session_cookie());
    (
        jar,
        Json(LogoutResponse {
            message: "Logged out successfully",
        }),
    )
}

#[instrument(skip(state, payload))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<StatusResponse>, AuthError> {
    let email = payload.email.trim().to_lowercase();

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| {
            warn!(email = %email, "forgot-password for unknown email");
            AuthError::NotFound("User not found".into())
        })?;

    let token = tokens::generate_reset_token();
    let user = User::set_reset_token(&state.db, user.id, &token, tokens::reset_token_expiry())
        .await?;

    let reset_url = format!(
        "{}/reset-password/{}",
        state.config.client_url.trim_end_matches('/'),
        token
    );
    state
        .mailer
        .send_password_reset_email(&user.email, &reset_url)
        .await?;

    info!(user_id = %user.id, "password reset link issued");
    Ok(Json(StatusResponse {
        success: true,
        message: "Password reset link sent to your email",
    }))
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<StatusResponse>, AuthError> {
    if payload.password.len() < 6 {
        return Err(AuthError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }

    let user = User::find_by_reset_token(&state.db, &token)
        .await?
        .ok_or_else(|| {
            warn!("reset token unknown or expired");
            AuthError::NotFound("Invalid or expired reset token".into())
        })?;

    let hash = hash_password(&payload.password)?;
    let user = User::set_password(&state.db, user.id, &hash).await?;

    state.mailer.send_reset_success_email(&user.email).await?;

    info!(user_id = %user.id, "password reset");
    Ok(Json(StatusResponse {
        success: true,
        message: "Password updated successfully",
    }))
}

#[instrument(skip(state))]
pub async fn check_auth(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<CheckAuthResponse>, AuthError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            warn!(user_id = %user_id, "session for missing user");
            AuthError::NotFound("User not found".into())
        })?;

    Ok(Json(CheckAuthResponse {
        success: true,
        user: PublicUser::from(user),
    }))
}
