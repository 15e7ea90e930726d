//! Configuration types for the background removal workflows

use crate::error::{BgCutError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Storage key prefix for unmodified uploads
pub const ORIGINAL_PREFIX: &str = "original";

/// Storage key prefix for background-removed results
pub const MASKED_PREFIX: &str = "masked";

/// Object name used when the request carries an embedded base64 image
pub const UPLOADED_IMAGE_NAME: &str = "uploaded_image.jpg";

/// Output image format options for stored and saved results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// PNG with alpha channel transparency
    Png,
    /// JPEG (no transparency)
    Jpeg,
}

impl OutputFormat {
    /// MIME content type used when storing objects of this format
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// File extension (without the dot)
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// Configuration for the cloud handler
///
/// Groups the storage layout and processing parameters shared by every
/// request. Construct via [`ServiceConfig::builder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Object storage bucket receiving originals and masked results
    pub bucket: String,

    /// Expiry applied to presigned download URLs
    pub presign_ttl: Duration,

    /// JPEG quality (0-100) used when re-encoding fetched images for storage
    pub jpeg_quality: u8,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bucket: "background-remover-bucket".to_string(),
            presign_ttl: Duration::from_secs(3600),
            jpeg_quality: 90,
        }
    }
}

impl ServiceConfig {
    /// Create a new configuration builder for fluent construction
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bgcut::ServiceConfig;
    /// use std::time::Duration;
    ///
    /// let config = ServiceConfig::builder()
    ///     .bucket("my-bucket")
    ///     .presign_ttl(Duration::from_secs(3600))
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::new()
    }

    /// Storage key for the unmodified upload with the given object name
    #[must_use]
    pub fn original_key(&self, name: &str) -> String {
        format!("{ORIGINAL_PREFIX}/{name}")
    }

    /// Storage key for the background-removed result with the given object name
    #[must_use]
    pub fn masked_key(&self, name: &str) -> String {
        format!("{MASKED_PREFIX}/{name}")
    }
}

/// Builder for [`ServiceConfig`] with validation at build time
#[derive(Debug, Default)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    /// Create a new builder seeded with defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ServiceConfig::default(),
        }
    }

    /// Set the object storage bucket name
    #[must_use]
    pub fn bucket<S: Into<String>>(mut self, bucket: S) -> Self {
        self.config.bucket = bucket.into();
        self
    }

    /// Set the presigned URL expiry
    #[must_use]
    pub fn presign_ttl(mut self, ttl: Duration) -> Self {
        self.config.presign_ttl = ttl;
        self
    }

    /// Set the JPEG re-encoding quality (0-100)
    #[must_use]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality;
        self
    }

    /// Validate and produce the final configuration
    ///
    /// # Errors
    /// - Empty bucket name
    /// - Zero presign TTL
    /// - JPEG quality above 100
    pub fn build(self) -> Result<ServiceConfig> {
        if self.config.bucket.is_empty() {
            return Err(BgCutError::invalid_config("bucket name must not be empty"));
        }
        if self.config.presign_ttl.is_zero() {
            return Err(BgCutError::invalid_config(
                "presign TTL must be greater than zero",
            ));
        }
        if self.config.jpeg_quality > 100 {
            return Err(BgCutError::invalid_config(format!(
                "JPEG quality must be 0-100, got {}",
                self.config.jpeg_quality
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.bucket, "background-remover-bucket");
        assert_eq!(config.presign_ttl, Duration::from_secs(3600));
        assert_eq!(config.jpeg_quality, 90);
    }

    #[test]
    fn test_storage_keys() {
        let config = ServiceConfig::default();
        assert_eq!(config.original_key("cat.jpg"), "original/cat.jpg");
        assert_eq!(config.masked_key("cat.jpg"), "masked/cat.jpg");
    }

    #[test]
    fn test_builder_validation() {
        assert!(ServiceConfig::builder().bucket("").build().is_err());
        assert!(ServiceConfig::builder()
            .presign_ttl(Duration::from_secs(0))
            .build()
            .is_err());
        assert!(ServiceConfig::builder().jpeg_quality(150).build().is_err());

        let config = ServiceConfig::builder()
            .bucket("uploads")
            .jpeg_quality(85)
            .build()
            .unwrap();
        assert_eq!(config.bucket, "uploads");
        assert_eq!(config.jpeg_quality, 85);
    }

    #[test]
    fn test_output_format() {
        assert_eq!(OutputFormat::Png.content_type(), "image/png");
        assert_eq!(OutputFormat::Jpeg.content_type(), "image/jpeg");
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
    }
}
