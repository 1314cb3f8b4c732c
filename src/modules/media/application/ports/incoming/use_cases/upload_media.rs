use async_trait::async_trait;

use crate::modules::media::application::domain::entities::{Bucket, UploadFile, UploadResult};

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("File type {mime} not allowed for {bucket}")]
    TypeNotAllowed { mime: String, bucket: Bucket },

    #[error("Upload failed: {0}")]
    Storage(String),
}

//
// ──────────────────────────────────────────────────────────
// Incoming Port (Use Case)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait UploadMedia: Send + Sync {
    /// Checks the MIME allow-list, then stores the file under `path` or a
    /// generated key.
    async fn upload(
        &self,
        file: UploadFile,
        bucket: Bucket,
        path: Option<String>,
    ) -> Result<UploadResult, UploadError>;

    /// `true` when the object was removed. Failures are logged, never raised.
    async fn delete_file(&self, bucket: Bucket, path: &str) -> bool;
}
