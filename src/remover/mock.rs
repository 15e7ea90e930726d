//! Mock remover implementation for testing and offline runs

use crate::error::{BgCutError, Result};
use crate::remover::BackgroundRemover;
use async_trait::async_trait;
use image::Rgba;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock background remover
///
/// Decodes the input and clears the alpha of every pixel matching the
/// top-left corner color, a crude stand-in for real segmentation that is
/// deterministic and needs no model. Tracks invocation counts so tests can
/// assert whether processing was attempted.
#[derive(Debug, Default)]
pub struct MockRemover {
    calls: AtomicUsize,
    fail: bool,
}

impl MockRemover {
    /// Create a mock remover that succeeds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock remover that fails every invocation
    #[must_use]
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    /// Number of times `remove_background` has been invoked
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackgroundRemover for MockRemover {
    async fn remove_background(&self, image_bytes: &[u8]) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(BgCutError::segmentation("mock remover configured to fail"));
        }

        let image = image::load_from_memory(image_bytes)
            .map_err(|e| BgCutError::segmentation(format!("failed to decode input: {e}")))?;

        let mut rgba = image.to_rgba8();
        let background = *rgba
            .get_pixel_checked(0, 0)
            .unwrap_or(&Rgba([0, 0, 0, 255]));

        for pixel in rgba.pixels_mut() {
            if pixel[0] == background[0] && pixel[1] == background[1] && pixel[2] == background[2] {
                pixel[3] = 0;
            }
        }

        let mut buffer = Vec::new();
        rgba.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .map_err(|e| BgCutError::segmentation(format!("failed to encode result: {e}")))?;

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn sample_image() -> Vec<u8> {
        let mut img = RgbImage::from_pixel(4, 4, image::Rgb([255, 255, 255]));
        img.put_pixel(2, 2, image::Rgb([10, 20, 30]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[tokio::test]
    async fn test_mock_clears_background_pixels() {
        let remover = MockRemover::new();
        let result = remover.remove_background(&sample_image()).await.unwrap();

        let output = image::load_from_memory(&result).unwrap().to_rgba8();
        // Corner matched the background color and became transparent
        assert_eq!(output.get_pixel(0, 0)[3], 0);
        // The distinct subject pixel kept its alpha
        assert_eq!(output.get_pixel(2, 2)[3], 255);
        assert_eq!(remover.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let remover = MockRemover::failing();
        let err = remover.remove_background(&sample_image()).await.unwrap_err();
        assert!(matches!(err, BgCutError::Segmentation(_)));
        assert_eq!(remover.call_count(), 1);
    }

    #[tokio::test]
    async fn test_undecodable_input() {
        let remover = MockRemover::new();
        let err = remover.remove_background(b"not an image").await.unwrap_err();
        assert!(matches!(err, BgCutError::Segmentation(_)));
    }
}
