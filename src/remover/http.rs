//! Remote segmentation endpoint client
//!
//! Sends the encoded image to an external background-removal service (for
//! example a `rembg` server) and returns the response bytes unchanged.

use crate::error::{BgCutError, Result};
use crate::remover::BackgroundRemover;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Default request timeout for segmentation calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Background remover backed by an external HTTP segmentation service
///
/// The endpoint receives the raw image bytes as the POST body and is expected
/// to answer `200` with the background-removed image bytes.
#[derive(Debug, Clone)]
pub struct HttpRemover {
    client: Client,
    endpoint: String,
}

impl HttpRemover {
    /// Create a remover targeting the given endpoint URL
    ///
    /// # Errors
    /// - Failed to construct the HTTP client
    pub fn new<S: Into<String>>(endpoint: S) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BgCutError::network_error("create HTTP client", &e))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint URL this remover talks to
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BackgroundRemover for HttpRemover {
    async fn remove_background(&self, image_bytes: &[u8]) -> Result<Vec<u8>> {
        tracing::debug!(
            endpoint = %self.endpoint,
            bytes = image_bytes.len(),
            "sending image to segmentation endpoint"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image_bytes.to_vec())
            .send()
            .await
            .map_err(|e| BgCutError::segmentation(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(BgCutError::segmentation(format!(
                "endpoint returned {status}: {detail}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| BgCutError::segmentation(format!("failed to read response body: {e}")))?;

        if body.is_empty() {
            return Err(BgCutError::segmentation("endpoint returned an empty body"));
        }

        tracing::debug!(bytes = body.len(), "segmentation endpoint responded");
        Ok(body.to_vec())
    }
}
