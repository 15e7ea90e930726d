//! In-memory object storage for tests and local experiments

use crate::error::{BgCutError, Result};
use crate::storage::{ObjectStorage, PresignedUrl};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// An object held by [`MemoryStorage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Raw object bytes
    pub bytes: Vec<u8>,
    /// Declared content type
    pub content_type: String,
}

/// Object storage keeping everything in a process-local map
///
/// Mirrors the overwrite semantics of the S3 backend and records every
/// presign TTL it is asked for, so tests can assert on the expiry parameter.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, StoredObject>>,
    presigned_ttls: Mutex<Vec<(String, Duration)>>,
    fail_puts: bool,
}

impl MemoryStorage {
    /// Create an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose writes always fail
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_puts: true,
            ..Self::default()
        }
    }

    /// Fetch a stored object by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    /// Number of stored objects
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Whether the store holds no objects
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.lock().unwrap().is_empty()
    }

    /// Every `(key, ttl)` pair passed to [`ObjectStorage::presign_get`]
    #[must_use]
    pub fn presigned_ttls(&self) -> Vec<(String, Duration)> {
        self.presigned_ttls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn put_object(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        if self.fail_puts {
            return Err(BgCutError::storage_object_error(
                "put",
                key,
                "memory storage configured to fail",
            ));
        }

        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<PresignedUrl> {
        if !self.objects.lock().unwrap().contains_key(key) {
            return Err(BgCutError::presign(format!("no such object '{key}'")));
        }

        self.presigned_ttls
            .lock()
            .unwrap()
            .push((key.to_string(), ttl));

        Ok(PresignedUrl::new(
            format!("memory://bucket/{key}?expires={}", ttl.as_secs()),
            ttl,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let storage = MemoryStorage::new();
        storage
            .put_object("original/cat.jpg", vec![1, 2, 3], "image/jpeg")
            .await
            .unwrap();

        let object = storage.get("original/cat.jpg").unwrap();
        assert_eq!(object.bytes, vec![1, 2, 3]);
        assert_eq!(object.content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_key() {
        let storage = MemoryStorage::new();
        storage
            .put_object("original/cat.jpg", vec![1], "image/jpeg")
            .await
            .unwrap();
        storage
            .put_object("original/cat.jpg", vec![2], "image/jpeg")
            .await
            .unwrap();

        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get("original/cat.jpg").unwrap().bytes, vec![2]);
    }

    #[tokio::test]
    async fn test_presign_records_ttl() {
        let storage = MemoryStorage::new();
        storage
            .put_object("masked/cat.jpg", vec![1], "image/png")
            .await
            .unwrap();

        let presigned = storage
            .presign_get("masked/cat.jpg", Duration::from_secs(3600))
            .await
            .unwrap();
        assert!(presigned.url.contains("masked/cat.jpg"));
        assert!(presigned.url.contains("expires=3600"));
        assert!(presigned.expires_at > chrono::Utc::now());

        let ttls = storage.presigned_ttls();
        assert_eq!(ttls.len(), 1);
        assert_eq!(ttls[0].1, Duration::from_secs(3600));
    }

    #[tokio::test]
    async fn test_presign_missing_object() {
        let storage = MemoryStorage::new();
        let err = storage
            .presign_get("original/missing.jpg", Duration::from_secs(3600))
            .await
            .unwrap_err();
        assert!(matches!(err, BgCutError::Presign(_)));
    }

    #[tokio::test]
    async fn test_failing_storage() {
        let storage = MemoryStorage::failing();
        let err = storage
            .put_object("original/cat.jpg", vec![1], "image/jpeg")
            .await
            .unwrap_err();
        assert!(matches!(err, BgCutError::Storage(_)));
        assert!(storage.is_empty());
    }
}
