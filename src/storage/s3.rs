//! S3-backed object storage

use crate::error::{BgCutError, Result};
use crate::storage::{ObjectStorage, PresignedUrl};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::time::Duration;

/// Object storage backed by an S3 (or S3-compatible) bucket
///
/// Credentials and region resolve through the standard AWS environment
/// (environment variables, profile, instance metadata). A custom endpoint
/// supports MinIO and other S3-compatible services.
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
}

impl S3Storage {
    /// Connect using the ambient AWS configuration
    pub async fn connect<S: Into<String>>(bucket: S) -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self {
            client: Client::new(&config),
            bucket: bucket.into(),
        }
    }

    /// Connect against a custom S3-compatible endpoint (e.g. MinIO)
    ///
    /// Path-style addressing is forced because most self-hosted services do
    /// not resolve virtual-hosted bucket names.
    pub async fn connect_with_endpoint<S: Into<String>>(bucket: S, endpoint_url: &str) -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .endpoint_url(endpoint_url)
            .force_path_style(true)
            .build();
        Self {
            client: Client::from_conf(s3_config),
            bucket: bucket.into(),
        }
    }

    /// Bucket this storage writes to
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put_object(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| BgCutError::storage_object_error("put", key, &e.to_string()))?;

        tracing::info!(bucket = %self.bucket, key, size, "stored object");
        Ok(())
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<PresignedUrl> {
        let presigning = PresigningConfig::expires_in(ttl)
            .map_err(|e| BgCutError::presign(format!("invalid expiry {ttl:?}: {e}")))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| BgCutError::presign(format!("failed to sign URL for '{key}': {e}")))?;

        Ok(PresignedUrl::new(request.uri().to_string(), ttl))
    }
}
