use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::auth::extract::{cleared_cookie, session_cookie, AuthUser};
use crate::auth::otp::{check_otp, generate_otp};
use crate::auth::password::{generate_salt, hash_password, verify_password};
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::mail::Mail;
use crate::models::user::{NewUser, Role, User};
use crate::profile;
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Deserialize)]
pub struct ResendOtpRequest {
    pub email: String,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl RegisterRequest {
    fn validate(&self) -> Result<Role, AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }
        let email = self.email.trim();
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(AppError::Validation("A valid email is required".to_string()));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        self.role.parse::<Role>().map_err(AppError::Validation)
    }
}

async fn send_otp(state: &AppState, email: &str) -> Result<(), AppError> {
    let code = generate_otp();
    state.otp.put(email, &code).await?;
    state
        .mailer
        .send(Mail::otp(email, &code, state.config.otp_ttl_seconds))
        .await?;
    Ok(())
}

/// Issues a token for `user` and returns it with the matching `Set-Cookie`.
fn issue_session(
    state: &AppState,
    user: &User,
    message: &str,
) -> Result<impl IntoResponse, AppError> {
    let token = state.jwt.create_token(user.id, user.role)?;
    let cookie = session_cookie(&token, state.jwt.ttl_seconds(), state.config.cookie_secure);
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(json!({
            "message": message,
            "token": token,
            "user": user,
        })),
    ))
}

/// POST /auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let role = req.validate()?;
    let email = normalize_email(&req.email);
    let store = state.store.as_ref();

    if store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Validation(
            "An account with this email already exists".to_string(),
        ));
    }

    let salt = generate_salt();
    let user = store
        .insert_user(NewUser {
            name: req.name.trim().to_string(),
            email: email.clone(),
            phone: req.phone.trim().to_string(),
            password_hash: hash_password(&req.password, &salt),
            salt,
            role,
        })
        .await?;
    profile::create_profile(store, &user).await?;
    send_otp(&state, &email).await?;

    info!("Registered {} account {}", user.role, user.id);
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Registration successful. Check your email for the verification code.",
            "user": user,
        })),
    ))
}

/// POST /auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = normalize_email(&req.email);
    let user = state
        .store
        .find_user_by_email(&email)
        .await?
        .filter(|u| verify_password(&req.password, &u.salt, &u.password_hash));
    let Some(user) = user else {
        warn!("Failed login for {email}");
        return Err(AppError::Validation("Invalid email or password".to_string()));
    };
    if !user.is_verified {
        return Err(AppError::Forbidden(
            "Please verify your email before logging in".to_string(),
        ));
    }

    info!("User {} logged in", user.id);
    issue_session(&state, &user, "Login successful")
}

/// POST /auth/verify-otp
pub async fn handle_verify_otp(
    State(state): State<AppState>,
    AppJson(req): AppJson<VerifyOtpRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = normalize_email(&req.email);
    let mut user = state
        .store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    if !check_otp(state.otp.as_ref(), &email, &req.otp).await? {
        return Err(AppError::Validation("Invalid or expired OTP".to_string()));
    }
    state.store.mark_user_verified(user.id).await?;
    user.is_verified = true;

    info!("User {} verified their email", user.id);
    issue_session(&state, &user, "Email verified")
}

/// POST /auth/resend-otp
pub async fn handle_resend_otp(
    State(state): State<AppState>,
    AppJson(req): AppJson<ResendOtpRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let email = normalize_email(&req.email);
    let user = state
        .store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    if user.is_verified {
        return Err(AppError::Validation("Account is already verified".to_string()));
    }

    send_otp(&state, &email).await?;
    Ok(Json(json!({ "message": "A new verification code has been sent" })))
}

/// POST /auth/logout
pub async fn handle_logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        AppendHeaders([(header::SET_COOKIE, cleared_cookie(state.config.cookie_secure))]),
        Json(json!({ "message": "Logged out" })),
    )
}

/// GET /auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let account = state
        .store
        .find_user(user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    let profile = profile::load_profile(state.store.as_ref(), user.user_id).await?;
    Ok(Json(json!({
        "message": "Current user",
        "user": account,
        "profile": profile,
    })))
}
