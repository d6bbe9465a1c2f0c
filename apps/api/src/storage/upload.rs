use axum::extract::multipart::{Field, Multipart};
use bytes::Bytes;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::storage::{MediaStore, StorageError};

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_VEHICLE_PICTURES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    ProfileImage,
    Resume,
    VehiclePicture,
}

impl MediaKind {
    fn prefix(&self) -> &'static str {
        match self {
            MediaKind::ProfileImage => "images",
            MediaKind::Resume => "resumes",
            MediaKind::VehiclePicture => "vehicles",
        }
    }

    pub fn accepts(&self, content_type: &str) -> bool {
        match self {
            MediaKind::ProfileImage | MediaKind::VehiclePicture => {
                content_type.starts_with("image/")
            }
            MediaKind::Resume => content_type == "application/pdf",
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            MediaKind::ProfileImage | MediaKind::VehiclePicture => "an image",
            MediaKind::Resume => "a PDF document",
        }
    }
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "application/pdf" => "pdf",
        _ => "bin",
    }
}

/// A multipart file spooled to local disk before it is forwarded to the
/// media store. The temp file is removed when this value is dropped.
pub struct SpooledUpload {
    kind: MediaKind,
    content_type: String,
    size: usize,
    temp: NamedTempFile,
}

impl SpooledUpload {
    pub async fn from_field(mut field: Field<'_>, kind: MediaKind) -> Result<Self, AppError> {
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        if !kind.accepts(&content_type) {
            return Err(AppError::Validation(format!(
                "Uploaded file must be {}, got '{content_type}'",
                kind.expected()
            )));
        }

        let temp = NamedTempFile::new().map_err(StorageError::from)?;
        let mut file = tokio::fs::File::from_std(
            temp.as_file().try_clone().map_err(StorageError::from)?,
        );
        let mut size = 0usize;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
        {
            size += chunk.len();
            if size > MAX_UPLOAD_BYTES {
                return Err(AppError::Validation(format!(
                    "Uploaded file exceeds the {} MiB limit",
                    MAX_UPLOAD_BYTES / (1024 * 1024)
                )));
            }
            file.write_all(&chunk).await.map_err(StorageError::from)?;
        }
        file.flush().await.map_err(StorageError::from)?;

        if size == 0 {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }

        debug!("Spooled {size} byte upload to {}", temp.path().display());
        Ok(Self {
            kind,
            content_type,
            size,
            temp,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Forwards the spooled file to the media store under a key scoped to
    /// `owner` and returns its public URL.
    pub async fn store(self, media: &dyn MediaStore, owner: Uuid) -> Result<String, AppError> {
        let body = tokio::fs::read(self.temp.path())
            .await
            .map_err(StorageError::from)?;
        let key = format!(
            "{}/{}/{}.{}",
            self.kind.prefix(),
            owner,
            Uuid::new_v4(),
            extension_for(&self.content_type)
        );
        debug!("Forwarding {} byte upload to {key}", self.size());
        let url = media.put(&key, Bytes::from(body), &self.content_type).await?;
        Ok(url)
    }
}

/// Spools the first file part named `name`, skipping any other parts.
pub async fn single_file(
    multipart: &mut Multipart,
    name: &str,
    kind: MediaKind,
) -> Result<SpooledUpload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some(name) {
            return SpooledUpload::from_field(field, kind).await;
        }
    }
    Err(AppError::Validation(format!("No '{name}' file was uploaded")))
}

#[cfg(test)]
impl SpooledUpload {
    pub fn from_bytes(kind: MediaKind, content_type: &str, bytes: &[u8]) -> Self {
        use std::io::Write;

        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(bytes).unwrap();
        Self {
            kind,
            content_type: content_type.to_string(),
            size: bytes.len(),
            temp,
        }
    }
}
