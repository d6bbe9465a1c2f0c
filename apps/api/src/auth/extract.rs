use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;
use uuid::Uuid;

use crate::auth::jwt::JwtService;
use crate::errors::AppError;
use crate::models::user::Role;
use crate::state::AppState;

pub const TOKEN_COOKIE: &str = "token";

/// The caller, as proven by a valid JWT. Handlers that take this extractor
/// reject anonymous requests with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn require(&self, role: Role) -> Result<(), AppError> {
        self.require_any(&[role])
    }

    pub fn require_any(&self, roles: &[Role]) -> Result<(), AppError> {
        if roles.contains(&self.role) {
            return Ok(());
        }
        let allowed = roles
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(" or ");
        Err(AppError::Forbidden(format!(
            "This action is only available to {allowed} accounts"
        )))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        authenticate(&parts.headers, &state.jwt).ok_or(AppError::Unauthorized)
    }
}

fn authenticate(headers: &HeaderMap, jwt: &JwtService) -> Option<AuthUser> {
    let Some(token) = token_from_headers(headers) else {
        debug!("No authentication token on request");
        return None;
    };
    match jwt.verify_token(&token) {
        Ok(claims) => {
            debug!("Authenticated {} ({})", claims.user_id, claims.role);
            Some(AuthUser {
                user_id: claims.user_id,
                role: claims.role,
            })
        }
        Err(e) => {
            debug!("Rejected token: {e}");
            None
        }
    }
}

/// Bearer header first, then the `token` cookie.
fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value carrying a freshly issued token.
pub fn session_cookie(token: &str, max_age_seconds: i64, secure: bool) -> String {
    let mut cookie =
        format!("{TOKEN_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age_seconds}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn cleared_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn service() -> JwtService {
        JwtService::new("test_secret", "gigboard".to_string(), 24)
    }

    #[test]
    fn test_bearer_header() {
        let jwt = service();
        let user_id = Uuid::new_v4();
        let token = jwt.create_token(user_id, Role::Worker).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        let user = authenticate(&headers, &jwt).unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.role, Role::Worker);
    }

    #[test]
    fn test_cookie_among_others() {
        let jwt = service();
        let user_id = Uuid::new_v4();
        let token = jwt.create_token(user_id, Role::Owner).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; token={token}; lang=en")).unwrap(),
        );

        let user = authenticate(&headers, &jwt).unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.role, Role::Owner);
    }

    #[test]
    fn test_missing_or_invalid_token() {
        let jwt = service();
        assert!(authenticate(&HeaderMap::new(), &jwt).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer nope"));
        assert!(authenticate(&headers, &jwt).is_none());
    }

    #[test]
    fn test_role_gate() {
        let user = AuthUser {
            user_id: Uuid::new_v4(),
            role: Role::Owner,
        };
        assert!(user.require_any(&[Role::Worker, Role::Owner]).is_ok());
        let err = user.require(Role::Contractor).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_cookie_attributes() {
        assert_eq!(
            session_cookie("abc", 3600, true),
            "token=abc; HttpOnly; Path=/; SameSite=Lax; Max-Age=3600; Secure"
        );
        assert_eq!(
            cleared_cookie(false),
            "token=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0"
        );
    }
}
