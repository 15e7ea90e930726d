//! Background removal capability
//!
//! The segmentation model itself is an external collaborator. This module
//! defines the call/response contract ([`BackgroundRemover`]) and the two
//! shipped implementations: a remote HTTP endpoint and a mock for tests and
//! offline runs.

mod http;
mod mock;

pub use http::HttpRemover;
pub use mock::MockRemover;

use crate::error::Result;
use async_trait::async_trait;

/// Capability that, given raw image bytes, returns image bytes with the
/// background rendered transparent
///
/// Implementations receive an encoded image (JPEG, PNG, ...) and return an
/// encoded image; the output is expected to carry an alpha channel (PNG).
#[async_trait]
pub trait BackgroundRemover: Send + Sync {
    /// Remove the background from an encoded image
    ///
    /// # Errors
    /// - The segmentation endpoint is unreachable or rejects the image
    /// - The input bytes are not a decodable image
    async fn remove_background(&self, image_bytes: &[u8]) -> Result<Vec<u8>>;
}
