//! # Label Storage
//!
//! Decodes base64 label images from the carrier and stores them as files,
//! returning a URL the caller can fetch the label from.
//!
//! Label storage is best-effort from the pipeline's point of view: the
//! resolver logs a failed save and quotes without a label URL rather than
//! failing the row.

use crate::domain::value_objects::Timestamp;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Error type for label storage operations.
#[derive(Debug, Error)]
pub enum LabelError {
    /// The label image was not valid base64.
    #[error("label image is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Filesystem failure while writing the label.
    #[error("failed to write label file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for label storage operations.
pub type LabelResult<T> = Result<T, LabelError>;

/// Port for storing carrier label images.
#[async_trait]
pub trait LabelStore: Send + Sync + fmt::Debug {
    /// Decodes and stores a base64-encoded label image.
    ///
    /// Returns the public URL of the stored label.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::Decode` for invalid base64 and
    /// `LabelError::Io` when the file cannot be written.
    async fn save(&self, image_base64: &str) -> LabelResult<String>;
}

/// Filesystem-backed [`LabelStore`].
///
/// Writes `label_{timestamp}_{id}.gif` files under a configured directory
/// and maps them to URLs under a public base.
#[derive(Debug, Clone)]
pub struct FsLabelStore {
    dir: PathBuf,
    public_base_url: String,
}

impl FsLabelStore {
    /// Creates a filesystem label store.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.into(),
        }
    }

    fn next_file_name() -> String {
        let id = Uuid::new_v4().simple().to_string();
        format!("label_{}_{}.gif", Timestamp::now().compact(), &id[..8])
    }
}

#[async_trait]
impl LabelStore for FsLabelStore {
    async fn save(&self, image_base64: &str) -> LabelResult<String> {
        let bytes = STANDARD.decode(image_base64.trim())?;

        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = Self::next_file_name();
        tokio::fs::write(self.dir.join(&file_name), bytes).await?;

        Ok(format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            file_name
        ))
    }
}
