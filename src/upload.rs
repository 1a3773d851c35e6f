use crate::config::UploadConfig;
use actix_multipart::{Multipart, MultipartError};
use chrono::Utc;
use futures::stream::StreamExt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Multipart field carrying the product image.
pub const UPLOAD_FIELD: &str = "product";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file uploaded in field 'product'")]
    MissingField,

    #[error("Uploaded file exceeds {0} bytes")]
    TooLarge(usize),

    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

impl From<MultipartError> for UploadError {
    fn from(err: MultipartError) -> Self {
        UploadError::Multipart(err.to_string())
    }
}

/// Stores uploaded product images on disk and builds their public URLs.
#[derive(Clone, Debug)]
pub struct ImageStorage {
    dir: PathBuf,
    public_base_url: String,
    max_bytes: usize,
}

impl ImageStorage {
    pub fn new(config: &UploadConfig) -> Self {
        ImageStorage {
            dir: config.dir.clone(),
            public_base_url: config.public_base_url.clone(),
            max_bytes: config.max_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn public_url(&self, file_name: &str) -> String {
        format!("{}/images/{}", self.public_base_url, file_name)
    }

    /// Reads the `product` field from `payload`, writes it to the upload
    /// directory and returns the stored file name.
    pub async fn save(&self, mut payload: Multipart) -> Result<String, UploadError> {
        while let Some(field) = payload.next().await {
            let mut field = field?;
            let disposition = field.content_disposition();
            if disposition.get_name() != Some(UPLOAD_FIELD) {
                continue;
            }
            let file_name = stored_name(
                disposition.get_filename(),
                Utc::now().timestamp_millis(),
                Uuid::new_v4(),
            );

            let mut bytes = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk?;
                if bytes.len() + chunk.len() > self.max_bytes {
                    return Err(UploadError::TooLarge(self.max_bytes));
                }
                bytes.extend_from_slice(&chunk);
            }

            let path = self.dir.join(&file_name);
            actix_web::web::block(move || write_new(&path, &bytes))
                .await
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))??;
            log::info!("Stored upload {}", file_name);
            return Ok(file_name);
        }
        Err(UploadError::MissingField)
    }
}

// Never replaces an existing file.
fn write_new(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(bytes)
}

/// `product-<millis>-<uuid><.ext>`, keeping only a plain alphanumeric
/// extension from the client's file name.
fn stored_name(client_name: Option<&str>, millis: i64, nonce: Uuid) -> String {
    let extension = client_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();
    format!("{UPLOAD_FIELD}-{millis}-{}{extension}", nonce.simple())
}
