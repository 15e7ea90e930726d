//! Error types for background removal operations

use thiserror::Error;

/// Result type alias for background removal operations
pub type Result<T> = std::result::Result<T, BgCutError>;

/// Error types covering both the desktop tool and the cloud handler
#[derive(Error, Debug)]
pub enum BgCutError {
    /// Input/output errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding errors
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Request input that cannot be used (missing fields, bad base64, bad URL)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failures while fetching an image or talking to the segmentation endpoint
    #[error("Network error: {0}")]
    Network(String),

    /// Object storage read/write failures
    #[error("Storage error: {0}")]
    Storage(String),

    /// Presigned URL generation failures
    #[error("Presign error: {0}")]
    Presign(String),

    /// Background segmentation failures
    #[error("Segmentation error: {0}")]
    Segmentation(String),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error for unexpected conditions
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BgCutError {
    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new presign error
    pub fn presign<S: Into<String>>(msg: S) -> Self {
        Self::Presign(msg.into())
    }

    /// Create a new segmentation error
    pub fn segmentation<S: Into<String>>(msg: S) -> Self {
        Self::Segmentation(msg.into())
    }

    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Create a network error with operation context
    pub fn network_error(operation: &str, error: &reqwest::Error) -> Self {
        Self::Network(format!("Failed to {operation}: {error}"))
    }

    /// Create a file I/O error with operation context
    pub fn file_io_error<P: AsRef<std::path::Path>>(
        operation: &str,
        path: P,
        error: &std::io::Error,
    ) -> Self {
        let path_display = path.as_ref().display();
        Self::Io(std::io::Error::new(
            error.kind(),
            format!("Failed to {operation} '{path_display}': {error}"),
        ))
    }

    /// Create a storage error with bucket/key context
    pub fn storage_object_error(operation: &str, key: &str, error: &str) -> Self {
        Self::Storage(format!("Failed to {operation} object '{key}': {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_error_creation() {
        let err = BgCutError::invalid_input("neither img_url nor image_base64");
        assert!(matches!(err, BgCutError::InvalidInput(_)));

        let err = BgCutError::storage("bucket unavailable");
        assert!(matches!(err, BgCutError::Storage(_)));
    }

    #[test]
    fn test_error_display() {
        let err = BgCutError::segmentation("endpoint returned 502");
        assert_eq!(err.to_string(), "Segmentation error: endpoint returned 502");
    }

    #[test]
    fn test_file_io_error_context() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = BgCutError::file_io_error("read image file", Path::new("/tmp/cat.jpg"), &io_error);
        let error_string = err.to_string();
        assert!(error_string.contains("read image file"));
        assert!(error_string.contains("/tmp/cat.jpg"));
    }

    #[test]
    fn test_storage_object_error_context() {
        let err = BgCutError::storage_object_error("put", "original/cat.jpg", "timeout");
        let error_string = err.to_string();
        assert!(error_string.contains("put"));
        assert!(error_string.contains("original/cat.jpg"));
        assert!(error_string.contains("timeout"));
    }
}
