//! Image decoding and fixed-format re-encoding
//!
//! The cloud handler stores originals as JPEG regardless of what the client
//! uploaded; this module owns that conversion and keeps encoding concerns out
//! of the request pipeline.

use crate::error::Result;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

/// Service for decoding uploads and re-encoding them for storage
pub struct ImageFormatService;

impl ImageFormatService {
    /// Decode image bytes with content-based format detection
    ///
    /// # Errors
    /// - The bytes are not a decodable image in any supported format
    pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
        Ok(image::load_from_memory(bytes)?)
    }

    /// Encode an image as JPEG at the given quality
    ///
    /// Alpha is dropped; JPEG cannot represent transparency.
    ///
    /// # Errors
    /// - JPEG encoding fails
    pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
        let rgb = image.to_rgb8();
        let mut buffer = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
        rgb.write_with_encoder(encoder)?;
        Ok(buffer)
    }

    /// Decode arbitrary image bytes and re-encode them as JPEG
    ///
    /// Used by the cloud handler so every stored original is `image/jpeg`
    /// independent of the upload format.
    ///
    /// # Errors
    /// - The input does not decode as an image
    /// - JPEG encoding fails
    pub fn reencode_jpeg(bytes: &[u8], quality: u8) -> Result<Vec<u8>> {
        let image = Self::decode(bytes)?;
        Self::encode_jpeg(&image, quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(4, 4, image::Rgba([200, 100, 50, 255]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_decode_valid_image() {
        let image = ImageFormatService::decode(&png_bytes()).unwrap();
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 4);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(ImageFormatService::decode(b"definitely not an image").is_err());
    }

    #[test]
    fn test_reencode_jpeg_produces_jpeg() {
        let jpeg = ImageFormatService::reencode_jpeg(&png_bytes(), 90).unwrap();
        let format = image::guess_format(&jpeg).unwrap();
        assert_eq!(format, image::ImageFormat::Jpeg);

        // Still decodable at the original dimensions
        let decoded = ImageFormatService::decode(&jpeg).unwrap();
        assert_eq!(decoded.width(), 4);
    }
}
