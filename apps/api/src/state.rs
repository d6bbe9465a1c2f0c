use std::sync::Arc;

use crate::auth::jwt::JwtService;
use crate::auth::otp::OtpStore;
use crate::config::Config;
use crate::letters::LetterGenerator;
use crate::mail::Mailer;
use crate::storage::MediaStore;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every collaborator sits behind a trait object so tests can swap in
/// in-memory versions.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub otp: Arc<dyn OtpStore>,
    pub media: Arc<dyn MediaStore>,
    pub letters: Arc<dyn LetterGenerator>,
    pub mailer: Arc<dyn Mailer>,
    pub jwt: Arc<JwtService>,
    pub config: Config,
}
