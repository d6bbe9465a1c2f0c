mod auth;
mod config;
mod db;
mod errors;
mod extract;
mod jobs;
mod letters;
mod mail;
mod models;
mod notifications;
mod profile;
mod recommendations;
mod routes;
mod state;
mod storage;
mod store;
mod vehicles;

#[cfg(test)]
mod testing;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::auth::jwt::JwtService;
use crate::auth::otp::RedisOtpStore;
use crate::config::Config;
use crate::db::create_pool;
use crate::letters::PdfLetterGenerator;
use crate::mail::{HttpMailer, LogMailer, Mailer};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{MediaStore, S3MediaStore};
use crate::store::postgres::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Gigboard API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs pending migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis-backed OTP store
    let redis = redis::Client::open(config.redis_url.clone())?;
    let otp = Arc::new(RedisOtpStore::new(redis, config.otp_ttl_seconds));
    info!("Redis client initialized");

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    let media: Arc<dyn MediaStore> = Arc::new(S3MediaStore::new(
        s3,
        config.s3_bucket.clone(),
        config.media_public_url.clone(),
    ));
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    let letters = Arc::new(PdfLetterGenerator::new(media.clone()));

    let mailer: Arc<dyn Mailer> = match (&config.mail_api_url, &config.mail_api_key) {
        (Some(url), Some(key)) => {
            info!("Mail delivery via {url}");
            Arc::new(HttpMailer::new(
                url.clone(),
                key.clone(),
                config.mail_from.clone(),
            )?)
        }
        _ => {
            info!("MAIL_API_URL not set, OTP emails will only be logged");
            Arc::new(LogMailer)
        }
    };

    let jwt = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
        config.jwt_ttl_hours,
    ));

    // Build app state
    let state = AppState {
        store: Arc::new(PgStore::new(db)),
        otp,
        media,
        letters,
        mailer,
        jwt,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "gigboard-static",
    );

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    // MinIO serves buckets by path rather than by subdomain
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
