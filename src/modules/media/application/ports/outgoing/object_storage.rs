use async_trait::async_trait;

use crate::modules::media::application::domain::entities::Bucket;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Access denied")]
    AccessDenied,

    #[error("Bucket not found")]
    BucketNotFound,

    #[error("Object not found")]
    ObjectNotFound,

    #[error("Storage infrastructure error: {0}")]
    Infrastructure(String),
}

/// Object storage with public read access. Writes overwrite an existing
/// object at the same path.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `bytes` at `path` and returns the stored path.
    async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        bytes: bytes::Bytes,
        content_type: &str,
    ) -> Result<String, StorageError>;

    fn public_url(&self, bucket: Bucket, path: &str) -> String;

    async fn remove(&self, bucket: Bucket, path: &str) -> Result<(), StorageError>;
}
