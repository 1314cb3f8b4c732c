use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

use crate::modules::media::application::domain::entities::{
    generate_object_key, Bucket, UploadFile, UploadResult,
};
use crate::modules::media::application::ports::incoming::use_cases::{UploadError, UploadMedia};
use crate::modules::media::application::ports::outgoing::ObjectStorage;

pub struct UploadHelper {
    storage: Arc<dyn ObjectStorage>,
}

impl UploadHelper {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl UploadMedia for UploadHelper {
    async fn upload(
        &self,
        file: UploadFile,
        bucket: Bucket,
        path: Option<String>,
    ) -> Result<UploadResult, UploadError> {
        if !bucket.allows(&file.content_type) {
            return Err(UploadError::TypeNotAllowed {
                mime: file.content_type,
                bucket,
            });
        }

        let path = path
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| generate_object_key(&file.file_name));

        let stored = self
            .storage
            .upload(bucket, &path, file.bytes, &file.content_type)
            .await
            .map_err(|e| {
                error!("Upload to {} failed for {}: {}", bucket, path, e);
                UploadError::Storage(e.to_string())
            })?;

        info!("Uploaded {} to {}", stored, bucket);

        Ok(UploadResult {
            url: self.storage.public_url(bucket, &stored),
            path: stored,
        })
    }

    async fn delete_file(&self, bucket: Bucket, path: &str) -> bool {
        match self.storage.remove(bucket, path).await {
            Ok(()) => true,
            Err(e) => {
                error!("Delete of {} from {} failed: {}", path, bucket, e);
                false
            }
        }
    }
}
