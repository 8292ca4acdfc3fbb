use crate::config::UploadsConfig;
use crate::error::{AppError, AppResult};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Local image store for prize pictures.
///
/// Accepts a raw image blob, enforces the size ceiling and the image/*
/// content-type gate, writes `premio-<uuid>.<ext>` under the uploads
/// directory and returns the stable `/uploads/...` reference. The rest of
/// the backend stores and echoes that reference and never reads the bytes
/// back.
#[derive(Clone)]
pub struct ImageStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl ImageStore {
    pub fn new(config: &UploadsConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            max_bytes: config.max_bytes,
        }
    }

    /// Create the uploads directory if missing. Called once at startup.
    pub fn ensure_dir(&self) -> AppResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validate and persist one image, returning its reference path.
    pub async fn store(&self, bytes: &[u8], content_type: Option<&str>) -> AppResult<String> {
        if bytes.is_empty() {
            return Err(AppError::ValidationError(
                "Image payload is empty".to_string(),
            ));
        }
        if bytes.len() > self.max_bytes {
            return Err(AppError::ValidationError(format!(
                "Image exceeds the {} byte limit",
                self.max_bytes
            )));
        }
        let ext = extension_for(content_type)?;

        let filename = format!("premio-{}.{}", Uuid::new_v4(), ext);
        tokio::fs::write(self.dir.join(&filename), bytes).await?;

        Ok(format!("/uploads/{filename}"))
    }
}

/// Map an image content type to a file extension; anything else is rejected.
fn extension_for(content_type: Option<&str>) -> AppResult<&'static str> {
    match content_type {
        Some("image/png") => Ok("png"),
        Some("image/jpeg") => Ok("jpg"),
        Some("image/gif") => Ok("gif"),
        Some("image/webp") => Ok("webp"),
        Some("image/svg+xml") => Ok("svg"),
        Some(other) if other.starts_with("image/") => Ok("img"),
        _ => Err(AppError::ValidationError(
            "Only image uploads are accepted".to_string(),
        )),
    }
}
