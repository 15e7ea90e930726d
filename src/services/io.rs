//! Image file input/output for the desktop tool

use crate::error::{BgCutError, Result};
use image::DynamicImage;
use std::path::Path;

/// Service for loading and saving image files
pub struct ImageIoService;

impl ImageIoService {
    /// Load an image from a file path
    ///
    /// Tries extension-based format detection first and falls back to
    /// content-based detection when the extension lies.
    ///
    /// # Errors
    /// - The file does not exist or cannot be read
    /// - The bytes are not a decodable image
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(BgCutError::file_io_error(
                "read image file",
                path_ref,
                &std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            ));
        }

        match image::open(path_ref) {
            Ok(img) => Ok(img),
            Err(e) => {
                tracing::debug!(
                    path = %path_ref.display(),
                    error = %e,
                    "extension-based loading failed, trying content-based detection"
                );

                let data = std::fs::read(path_ref).map_err(|io_err| {
                    BgCutError::file_io_error("read image data", path_ref, &io_err)
                })?;

                image::load_from_memory(&data).map_err(|content_err| {
                    BgCutError::invalid_input(format!(
                        "failed to load image '{}' with both extension-based ({e}) and content-based ({content_err}) detection",
                        path_ref.display()
                    ))
                })
            },
        }
    }

    /// Save an image at a path, format inferred from the extension
    ///
    /// The parent directory is created when missing.
    ///
    /// # Errors
    /// - The extension does not map to a supported format
    /// - The file cannot be written
    pub fn save_image<P: AsRef<Path>>(image: &DynamicImage, path: P) -> Result<()> {
        let path_ref = path.as_ref();

        if let Some(parent) = path_ref.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    BgCutError::file_io_error("create output directory", parent, &e)
                })?;
            }
        }

        image.save(path_ref).map_err(|e| {
            BgCutError::Internal(format!(
                "failed to save image '{}': {e}",
                path_ref.display()
            ))
        })?;

        tracing::info!(path = %path_ref.display(), "saved image");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn sample_image() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255])))
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        ImageIoService::save_image(&sample_image(), &path).unwrap();
        let loaded = ImageIoService::load_image(&path).unwrap();
        assert_eq!(loaded.width(), 4);
        assert_eq!(loaded.height(), 4);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.png");

        ImageIoService::save_image(&sample_image(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ImageIoService::load_image("/nonexistent/picture.jpg").unwrap_err();
        assert!(matches!(err, BgCutError::Io(_)));
    }

    #[test]
    fn test_load_with_wrong_extension() {
        // PNG bytes behind a .jpg name still load via content detection
        let dir = tempfile::tempdir().unwrap();
        let png_path = dir.path().join("real.png");
        ImageIoService::save_image(&sample_image(), &png_path).unwrap();

        let lying_path = dir.path().join("lying.jpg");
        std::fs::copy(&png_path, &lying_path).unwrap();

        let loaded = ImageIoService::load_image(&lying_path).unwrap();
        assert_eq!(loaded.width(), 4);
    }

    #[test]
    fn test_load_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.png");
        std::fs::write(&path, b"not image data").unwrap();

        assert!(ImageIoService::load_image(&path).is_err());
    }
}
