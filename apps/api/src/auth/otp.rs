use async_trait::async_trait;
use rand::Rng;
use redis::AsyncCommands;

use crate::errors::AppError;

pub const OTP_DIGITS: usize = 6;

/// Holds one pending verification code per email address.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Stores `code` for `email`, replacing any earlier code.
    async fn put(&self, email: &str, code: &str) -> Result<(), AppError>;
    async fn get(&self, email: &str) -> Result<Option<String>, AppError>;
    async fn remove(&self, email: &str) -> Result<(), AppError>;
}

pub struct RedisOtpStore {
    client: redis::Client,
    ttl_seconds: u64,
}

impl RedisOtpStore {
    pub fn new(client: redis::Client, ttl_seconds: u64) -> Self {
        Self {
            client,
            ttl_seconds,
        }
    }
}

fn otp_key(email: &str) -> String {
    format!("otp:{email}")
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn put(&self, email: &str, code: &str) -> Result<(), AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex::<_, _, ()>(otp_key(email), code, self.ttl_seconds)
            .await?;
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let code: Option<String> = conn.get(otp_key(email)).await?;
        Ok(code)
    }

    async fn remove(&self, email: &str) -> Result<(), AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(otp_key(email)).await?;
        Ok(())
    }
}

pub fn generate_otp() -> String {
    let code: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{code:0width$}", width = OTP_DIGITS)
}

/// Consumes the stored code if `candidate` matches it. A mismatch leaves the
/// stored code in place so the user can retry.
pub async fn check_otp(store: &dyn OtpStore, email: &str, candidate: &str) -> Result<bool, AppError> {
    match store.get(email).await? {
        Some(code) if code == candidate.trim() => {
            store.remove(email).await?;
            Ok(true)
        }
        _ => Ok(false),
    }
}
