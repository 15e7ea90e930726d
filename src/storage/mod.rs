//! Object storage abstraction
//!
//! The cloud handler persists originals and masked results through this
//! trait so the S3 SDK can be swapped for an in-memory store in tests.

#[cfg(feature = "server")]
mod s3;

mod memory;

#[cfg(feature = "server")]
pub use s3::S3Storage;

pub use memory::{MemoryStorage, StoredObject};

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Presigned URL with expiration information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUrl {
    /// The signed GET URL
    pub url: String,
    /// UTC timestamp when the URL stops working
    pub expires_at: DateTime<Utc>,
}

impl PresignedUrl {
    /// Wrap a signed URL expiring `ttl` from now
    #[must_use]
    pub fn new(url: String, ttl: Duration) -> Self {
        Self {
            url,
            expires_at: Utc::now() + ttl,
        }
    }
}

/// Put/presign contract against a single bucket
///
/// Writes overwrite silently: repeated requests with colliding object names
/// replace the previously stored bytes.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store an object at `key` with the given content type
    ///
    /// # Errors
    /// - The storage backend rejects or fails the write
    async fn put_object(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;

    /// Issue a time-limited read URL for `key`
    ///
    /// The URL grants access for `ttl` without further authentication. It is
    /// generated on demand and never persisted.
    ///
    /// # Errors
    /// - URL signing fails
    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<PresignedUrl>;
}
