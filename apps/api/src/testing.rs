//! In-memory stand-ins for the external collaborators, shared by unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;

use crate::auth::jwt::JwtService;
use crate::auth::otp::OtpStore;
use crate::config::Config;
use crate::errors::AppError;
use crate::letters::{LetterError, LetterGenerator, LetterRequest, PdfLetterGenerator};
use crate::mail::{Mail, MailError, Mailer};
use crate::state::AppState;
use crate::storage::{MediaStore, StorageError};
use crate::store::memory::MemoryStore;

#[derive(Default)]
pub struct MemoryMediaStore {
    objects: Mutex<Vec<(String, Bytes)>>,
}

impl MemoryMediaStore {
    pub async fn objects(&self) -> Vec<(String, Bytes)> {
        self.objects.lock().await.clone()
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn put(&self, key: &str, body: Bytes, _content_type: &str) -> Result<String, StorageError> {
        self.objects.lock().await.push((key.to_string(), body));
        Ok(format!("memory://{key}"))
    }
}

#[derive(Default)]
pub struct MemoryOtpStore {
    codes: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl OtpStore for MemoryOtpStore {
    async fn put(&self, email: &str, code: &str) -> Result<(), AppError> {
        self.codes
            .lock()
            .await
            .insert(email.to_string(), code.to_string());
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<String>, AppError> {
        Ok(self.codes.lock().await.get(email).cloned())
    }

    async fn remove(&self, email: &str) -> Result<(), AppError> {
        self.codes.lock().await.remove(email);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Mail>>,
}

impl RecordingMailer {
    pub async fn sent(&self) -> Vec<Mail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: Mail) -> Result<(), MailError> {
        self.sent.lock().await.push(mail);
        Ok(())
    }
}

pub struct FailingLetterGenerator;

#[async_trait]
impl LetterGenerator for FailingLetterGenerator {
    async fn generate(&self, _request: &LetterRequest) -> Result<String, LetterError> {
        Err(LetterError::Render("renderer unavailable".to_string()))
    }
}

/// Handles on every in-memory collaborator behind a test `AppState`.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub media: Arc<MemoryMediaStore>,
    pub otp: Arc<MemoryOtpStore>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    pub fn new() -> Self {
        let media = Arc::new(MemoryMediaStore::default());
        Self::with_letters(media.clone(), Arc::new(PdfLetterGenerator::new(media)))
    }

    pub fn with_failing_letters() -> Self {
        Self::with_letters(
            Arc::new(MemoryMediaStore::default()),
            Arc::new(FailingLetterGenerator),
        )
    }

    fn with_letters(media: Arc<MemoryMediaStore>, letters: Arc<dyn LetterGenerator>) -> Self {
        let config = Config::for_tests();
        let store = Arc::new(MemoryStore::new());
        let otp = Arc::new(MemoryOtpStore::default());
        let mailer = Arc::new(RecordingMailer::default());
        let jwt = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_issuer.clone(),
            config.jwt_ttl_hours,
        ));
        let state = AppState {
            store: store.clone(),
            otp: otp.clone(),
            media: media.clone(),
            letters,
            mailer: mailer.clone(),
            jwt,
            config,
        };
        Self {
            state,
            store,
            media,
            otp,
            mailer,
        }
    }
}
