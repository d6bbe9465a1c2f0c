use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_ttl_hours: i64,
    pub otp_ttl_seconds: u64,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Public base URL under which uploaded objects are reachable.
    pub media_public_url: String,
    pub mail_api_url: Option<String>,
    pub mail_api_key: Option<String>,
    pub mail_from: String,
    pub cookie_secure: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            jwt_issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "gigboard".to_string()),
            jwt_ttl_hours: parse_env("JWT_TTL_HOURS", 24)?,
            otp_ttl_seconds: parse_env("OTP_TTL_SECONDS", 600)?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            media_public_url: require_env("MEDIA_PUBLIC_URL")?,
            mail_api_url: std::env::var("MAIL_API_URL").ok(),
            mail_api_key: std::env::var("MAIL_API_KEY").ok(),
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "no-reply@gigboard.local".to_string()),
            cookie_secure: parse_env("COOKIE_SECURE", false)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/gigboard_test".to_string(),
            redis_url: "redis://localhost".to_string(),
            jwt_secret: "test_secret".to_string(),
            jwt_issuer: "gigboard-test".to_string(),
            jwt_ttl_hours: 24,
            otp_ttl_seconds: 600,
            s3_bucket: "gigboard-test".to_string(),
            s3_endpoint: "http://localhost:9000".to_string(),
            aws_access_key_id: "minio".to_string(),
            aws_secret_access_key: "minio123".to_string(),
            media_public_url: "http://media.test".to_string(),
            mail_api_url: None,
            mail_api_key: None,
            mail_from: "no-reply@gigboard.test".to_string(),
            cookie_secure: false,
            port: 8080,
            rust_log: "debug".to_string(),
        }
    }
}
