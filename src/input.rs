//! Request input handling for the cloud handler
//!
//! A request supplies an image either as an HTTP(S) URL or as an embedded
//! data-URL base64 string. This module derives the object name and turns
//! either form into raw image bytes.

use crate::config::UPLOADED_IMAGE_NAME;
use crate::error::{BgCutError, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Where the image comes from in a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Remote image referenced by the `img_url` query parameter
    Url(String),
    /// Embedded image from the `image_base64` body field (data-URL style)
    DataUrl(String),
}

/// Image bytes together with the object name derived from the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Object name shared by the `original/` and `masked/` keys
    pub name: String,
    /// Raw image bytes as received (not yet re-encoded)
    pub bytes: Vec<u8>,
}

impl ImageSource {
    /// Fetch or decode the image bytes and derive the object name
    ///
    /// # Errors
    /// - The URL cannot be fetched or answers with a non-success status
    /// - The data URL has no base64 payload or the payload does not decode
    pub async fn resolve(&self, client: &reqwest::Client) -> Result<SourceImage> {
        match self {
            Self::Url(url) => {
                let bytes = fetch_image(client, url).await?;
                Ok(SourceImage {
                    name: name_from_url(url),
                    bytes,
                })
            },
            Self::DataUrl(data) => Ok(SourceImage {
                name: UPLOADED_IMAGE_NAME.to_string(),
                bytes: decode_data_url(data)?,
            }),
        }
    }
}

/// Derive the object name from the last path segment of a URL
///
/// Query string and fragment are ignored. An empty segment (trailing slash,
/// bare host) falls back to the uploaded-image placeholder so the storage
/// keys stay well-formed.
#[must_use]
pub fn name_from_url(url: &str) -> String {
    let trimmed = url.split(['?', '#']).next().unwrap_or(url);
    let without_scheme = trimmed
        .split_once("://")
        .map_or(trimmed, |(_, rest)| rest);

    let segment = match without_scheme.split_once('/') {
        Some((_, path)) => path.rsplit('/').next().unwrap_or(""),
        // Bare host, no path to take a name from
        None => "",
    };

    if segment.is_empty() {
        UPLOADED_IMAGE_NAME.to_string()
    } else {
        segment.to_string()
    }
}

/// Decode a data-URL-style base64 string (`<prefix>,<payload>`)
///
/// Everything before the first comma is treated as the data-URL prefix and
/// discarded; the remainder must be standard base64.
///
/// # Errors
/// - No comma separator
/// - Payload is not valid base64
pub fn decode_data_url(data: &str) -> Result<Vec<u8>> {
    let (_, payload) = data
        .split_once(',')
        .ok_or_else(|| BgCutError::invalid_input("data URL is missing the base64 payload"))?;

    BASE64
        .decode(payload.trim())
        .map_err(|e| BgCutError::invalid_input(format!("base64 payload does not decode: {e}")))
}

/// Download image bytes from a URL
///
/// # Errors
/// - Connection or protocol failure
/// - Non-success HTTP status
async fn fetch_image(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    tracing::debug!(url, "fetching image");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| BgCutError::network_error("fetch image", &e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(BgCutError::Network(format!(
            "image URL answered with status {status}"
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| BgCutError::network_error("read image body", &e))?;

    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_url_last_segment() {
        assert_eq!(name_from_url("https://example.com/pics/cat.jpg"), "cat.jpg");
        assert_eq!(name_from_url("http://host/a/b/c/dog.png"), "dog.png");
    }

    #[test]
    fn test_name_from_url_ignores_query_and_fragment() {
        assert_eq!(
            name_from_url("https://example.com/cat.jpg?size=large#top"),
            "cat.jpg"
        );
    }

    #[test]
    fn test_name_from_url_empty_segment_falls_back() {
        assert_eq!(name_from_url("https://example.com/pics/"), UPLOADED_IMAGE_NAME);
        assert_eq!(name_from_url("https://example.com"), UPLOADED_IMAGE_NAME);
    }

    #[test]
    fn test_decode_data_url() {
        let encoded = BASE64.encode(b"hello");
        let data = format!("data:image/jpeg;base64,{encoded}");
        assert_eq!(decode_data_url(&data).unwrap(), b"hello");
    }

    #[test]
    fn test_decode_data_url_without_comma() {
        let err = decode_data_url("no-comma-here").unwrap_err();
        assert!(matches!(err, BgCutError::InvalidInput(_)));
    }

    #[test]
    fn test_decode_data_url_bad_payload() {
        let err = decode_data_url("data:image/png;base64,@@@not-base64@@@").unwrap_err();
        assert!(matches!(err, BgCutError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_resolve_data_url_uses_placeholder_name() {
        let encoded = BASE64.encode(b"bytes");
        let source = ImageSource::DataUrl(format!("data:image/jpeg;base64,{encoded}"));
        let client = reqwest::Client::new();

        let image = source.resolve(&client).await.unwrap();
        assert_eq!(image.name, UPLOADED_IMAGE_NAME);
        assert_eq!(image.bytes, b"bytes");
    }

    #[tokio::test]
    async fn test_resolve_unreachable_url() {
        let source = ImageSource::Url("http://127.0.0.1:1/cat.jpg".to_string());
        let client = reqwest::Client::new();

        let err = source.resolve(&client).await.unwrap_err();
        assert!(matches!(err, BgCutError::Network(_)));
    }
}
