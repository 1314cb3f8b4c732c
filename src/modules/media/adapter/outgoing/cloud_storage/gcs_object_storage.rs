use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::modules::media::application::domain::entities::Bucket;
use crate::modules::media::application::ports::outgoing::{ObjectStorage, StorageError};

/// Uploaded assets are cached by clients for an hour.
const CACHE_CONTROL: &str = "public, max-age=3600";

pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://storage.googleapis.com";

/// RFC 3986 unreserved characters stay as-is inside a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// google-cloud-storage uses a bucket resource name format:
/// `projects/_/buckets/{bucket}`
fn bucket_resource(bucket: &str) -> String {
    format!("projects/_/buckets/{}", bucket)
}

fn map_storage_error(msg: &str) -> StorageError {
    let m = msg.to_lowercase();

    if m.contains("permission") || m.contains("forbidden") || m.contains("denied") {
        StorageError::AccessDenied
    } else if m.contains("bucket") && (m.contains("not found") || m.contains("404")) {
        StorageError::BucketNotFound
    } else if m.contains("not found") || m.contains("404") || m.contains("no such object") {
        StorageError::ObjectNotFound
    } else {
        StorageError::Infrastructure(msg.to_string())
    }
}

/// Internal seam so the adapter is testable without google-cloud-storage
/// request builders.
#[async_trait]
trait GcsClient: Send + Sync {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        bytes: bytes::Bytes,
        content_type: &str,
        cache_control: &str,
    ) -> Result<(), String>;

    async fn delete_object(&self, bucket_resource: &str, object_name: &str)
        -> Result<(), String>;
}

#[cfg(test)]
struct ArcGcsClient(Arc<dyn GcsClient>);

#[cfg(test)]
#[async_trait]
impl GcsClient for ArcGcsClient {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        bytes: bytes::Bytes,
        content_type: &str,
        cache_control: &str,
    ) -> Result<(), String> {
        self.0
            .write_object(bucket_resource, object_name, bytes, content_type, cache_control)
            .await
    }

    async fn delete_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
    ) -> Result<(), String> {
        self.0.delete_object(bucket_resource, object_name).await
    }
}

/// Production adapter for the `ObjectStorage` port.
///
/// Each logical bucket maps to `<prefix>-<bucket>` in GCS, e.g.
/// `portfolio-avatars`. Objects are served from `<public_base_url>/<bucket>/<path>`.
#[derive(Clone)]
pub struct GcsObjectStorage {
    client: Arc<OnceCell<Box<dyn GcsClient>>>,
    bucket_prefix: String,
    public_base_url: String,
}

impl GcsObjectStorage {
    /// Synchronous constructor - client is initialized lazily on first use.
    pub fn new(bucket_prefix: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            client: Arc::new(OnceCell::new()),
            bucket_prefix: bucket_prefix.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn bucket_name(&self, bucket: Bucket) -> String {
        format!("{}-{}", self.bucket_prefix, bucket.as_str())
    }

    async fn get_client(&self) -> Result<&dyn GcsClient, StorageError> {
        self.client
            .get_or_try_init(|| async {
                let real_client = RealGcsClient::new().await?;
                Ok::<_, Box<dyn std::error::Error + Send + Sync>>(
                    Box::new(real_client) as Box<dyn GcsClient>
                )
            })
            .await
            .map(|boxed| &**boxed)
            .map_err(|e| StorageError::Infrastructure(e.to_string()))
    }

    #[cfg(test)]
    fn with_client(client: Arc<dyn GcsClient>, bucket_prefix: &str, public_base_url: &str) -> Self {
        let once = OnceCell::new();
        let _ = once.set(Box::new(ArcGcsClient(client)) as Box<dyn GcsClient>);

        Self {
            client: Arc::new(once),
            bucket_prefix: bucket_prefix.to_string(),
            public_base_url: public_base_url.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStorage for GcsObjectStorage {
    async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        bytes: bytes::Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let client = self.get_client().await?;
        let resource = bucket_resource(&self.bucket_name(bucket));

        client
            .write_object(&resource, path, bytes, content_type, CACHE_CONTROL)
            .await
            .map_err(|e| map_storage_error(&e))?;

        Ok(path.to_string())
    }

    fn public_url(&self, bucket: Bucket, path: &str) -> String {
        let encoded = path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");

        format!(
            "{}/{}/{}",
            self.public_base_url,
            self.bucket_name(bucket),
            encoded
        )
    }

    async fn remove(&self, bucket: Bucket, path: &str) -> Result<(), StorageError> {
        let client = self.get_client().await?;
        let resource = bucket_resource(&self.bucket_name(bucket));

        client
            .delete_object(&resource, path)
            .await
            .map_err(|e| map_storage_error(&e))
    }
}

// ============================================================================
// Real Google Cloud Storage client (google-cloud-storage)
// ============================================================================

struct RealGcsClient {
    storage: google_cloud_storage::client::Storage,
    control: google_cloud_storage::client::StorageControl,
}

impl RealGcsClient {
    async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!("Initializing GCS client...");

        let storage = google_cloud_storage::client::Storage::builder()
            .build()
            .await
            .map_err(|e| {
                tracing::error!("Failed to build GCS storage client: {:?}", e);
                e
            })?;

        let control = google_cloud_storage::client::StorageControl::builder()
            .build()
            .await
            .map_err(|e| {
                tracing::error!("Failed to build GCS control client: {:?}", e);
                e
            })?;

        tracing::info!("GCS clients created");

        Ok(Self { storage, control })
    }
}

#[async_trait]
impl GcsClient for RealGcsClient {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        bytes: bytes::Bytes,
        content_type: &str,
        cache_control: &str,
    ) -> Result<(), String> {
        self.storage
            .write_object(bucket_resource.to_string(), object_name.to_string(), bytes)
            .set_content_type(content_type.to_string())
            .set_cache_control(cache_control.to_string())
            .send_buffered()
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }

    async fn delete_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
    ) -> Result<(), String> {
        self.control
            .delete_object()
            .set_bucket(bucket_resource.to_string())
            .set_object(object_name.to_string())
            .send()
            .await
            .map_err(|e| e.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
