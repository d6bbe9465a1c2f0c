//! Offer and joining letters. A letter is rendered to PDF, uploaded to the
//! media store, and the resulting URL is recorded on the job application.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::storage::{MediaStore, StorageError};

pub mod pdf;

#[derive(Debug, Error)]
pub enum LetterError {
    #[error("cannot render letter: {0}")]
    Render(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterKind {
    Offer,
    Joining,
}

impl LetterKind {
    fn slug(&self) -> &'static str {
        match self {
            LetterKind::Offer => "offer",
            LetterKind::Joining => "joining",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            LetterKind::Offer => "Offer Letter",
            LetterKind::Joining => "Joining Letter",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LetterRequest {
    pub kind: LetterKind,
    pub application_id: Uuid,
    pub worker_name: String,
    pub company_name: String,
    pub job_title: String,
    pub location: String,
    pub wage: f64,
    pub issued_on: NaiveDate,
}

impl LetterRequest {
    fn paragraphs(&self) -> Vec<String> {
        let mut body = vec![
            format!("Date: {}", self.issued_on.format("%d %B %Y")),
            format!("Reference: {}", self.application_id),
            String::new(),
            format!("Dear {},", self.worker_name),
            String::new(),
        ];
        match self.kind {
            LetterKind::Offer => {
                body.push(format!(
                    "We are pleased to offer you the position of {} with {} at {}.",
                    self.job_title, self.company_name, self.location
                ));
                body.push(format!(
                    "The agreed wage for this engagement is INR {:.2} per day.",
                    self.wage
                ));
                body.push(
                    "Please accept or decline this offer from your applications page.".to_string(),
                );
            }
            LetterKind::Joining => {
                body.push(format!(
                    "This letter confirms your joining as {} with {}.",
                    self.job_title, self.company_name
                ));
                body.push(format!(
                    "Please report at {} on your first working day. Your wage of INR {:.2} per day applies from that date.",
                    self.location, self.wage
                ));
                body.push(
                    "Accept this joining letter from your applications page to complete onboarding."
                        .to_string(),
                );
            }
        }
        body.extend([
            String::new(),
            "Sincerely,".to_string(),
            self.company_name.clone(),
        ]);
        body
    }

    fn validate(&self) -> Result<(), LetterError> {
        for (field, value) in [
            ("worker name", &self.worker_name),
            ("company name", &self.company_name),
            ("job title", &self.job_title),
        ] {
            if value.trim().is_empty() {
                return Err(LetterError::Render(format!("missing {field}")));
            }
        }
        Ok(())
    }
}

/// Produces a letter document and returns the URL it can be fetched from.
#[async_trait]
pub trait LetterGenerator: Send + Sync {
    async fn generate(&self, request: &LetterRequest) -> Result<String, LetterError>;
}

pub struct PdfLetterGenerator {
    media: Arc<dyn MediaStore>,
}

impl PdfLetterGenerator {
    pub fn new(media: Arc<dyn MediaStore>) -> Self {
        Self { media }
    }
}

#[async_trait]
impl LetterGenerator for PdfLetterGenerator {
    async fn generate(&self, request: &LetterRequest) -> Result<String, LetterError> {
        request.validate()?;
        let document = pdf::render_text_pdf(request.kind.title(), &request.paragraphs())
            .map_err(|e| LetterError::Render(e.to_string()))?;
        let key = format!(
            "letters/{}/{}.pdf",
            request.kind.slug(),
            request.application_id
        );
        let url = self
            .media
            .put(&key, Bytes::from(document), "application/pdf")
            .await?;
        info!(
            "Generated {} for application {}",
            request.kind.title().to_lowercase(),
            request.application_id
        );
        Ok(url)
    }
}
