//! Background removal endpoint
//!
//! Five linear stages: acquire the image, store the original, segment and
//! store the masked result, presign both keys, respond. The first failure
//! terminates the request; nothing retries and nothing is cleaned up.

use crate::config::OutputFormat;
use crate::input::ImageSource;
use crate::services::ImageFormatService;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::AppContext;

/// Query parameters accepted by the remove endpoint
#[derive(Debug, Deserialize)]
pub struct RemoveQuery {
    /// HTTP(S) URL of the image to process
    pub img_url: Option<String>,
}

/// JSON body accepted by the remove endpoint
#[derive(Debug, Deserialize)]
struct RemoveBody {
    /// Data-URL-style base64 image (`<prefix>,<payload>`)
    image_base64: Option<String>,
}

/// Success response carrying both presigned download URLs
#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    /// Presigned URL for the stored original
    pub original_image_url: String,
    /// Presigned URL for the background-removed result
    pub background_removed_image_url: String,
}

/// Remove the background from an image given by URL or embedded base64
///
/// Responds `200` with presigned URLs for the original and masked objects,
/// `400` for unusable input, `500` for storage/processing/presign failures.
/// Error bodies are plain text with a stage-specific message.
pub async fn remove_background(
    State(ctx): State<AppContext>,
    Query(query): Query<RemoveQuery>,
    body: String,
) -> Response {
    // Select the image source: query parameter wins, then JSON body
    let source = if let Some(url) = query.img_url {
        Some(ImageSource::Url(url))
    } else if body.trim().is_empty() {
        None
    } else {
        match serde_json::from_str::<RemoveBody>(&body) {
            Ok(parsed) => parsed.image_base64.map(ImageSource::DataUrl),
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    format!("Error retrieving image: {e}"),
                )
                    .into_response()
            },
        }
    };

    let Some(source) = source else {
        return (StatusCode::BAD_REQUEST, "Invalid image data").into_response();
    };

    // Stage 1: fetch or decode, then re-encode to JPEG for storage
    let image = match source.resolve(&ctx.http).await {
        Ok(image) => image,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                format!("Error retrieving image: {e}"),
            )
                .into_response()
        },
    };

    let original_jpeg = match ImageFormatService::reencode_jpeg(&image.bytes, ctx.config.jpeg_quality)
    {
        Ok(bytes) => bytes,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                format!("Error retrieving image: {e}"),
            )
                .into_response()
        },
    };

    // Stage 2: persist the original
    let original_key = ctx.config.original_key(&image.name);
    if let Err(e) = ctx
        .storage
        .put_object(
            &original_key,
            original_jpeg.clone(),
            OutputFormat::Jpeg.content_type(),
        )
        .await
    {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error saving original image: {e}"),
        )
            .into_response();
    }

    // Stage 3: segment and persist the masked result
    let masked_key = ctx.config.masked_key(&image.name);
    let masked = match ctx.remover.remove_background(&original_jpeg).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error processing image: {e}"),
            )
                .into_response()
        },
    };

    if let Err(e) = ctx
        .storage
        .put_object(&masked_key, masked, OutputFormat::Png.content_type())
        .await
    {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error processing image: {e}"),
        )
            .into_response();
    }

    // Stage 4: presign both keys
    let ttl = ctx.config.presign_ttl;
    let original = match ctx.storage.presign_get(&original_key, ttl).await {
        Ok(presigned) => presigned,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error generating presigned URLs: {e}"),
            )
                .into_response()
        },
    };

    let masked_presigned = match ctx.storage.presign_get(&masked_key, ttl).await {
        Ok(presigned) => presigned,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error generating presigned URLs: {e}"),
            )
                .into_response()
        },
    };

    tracing::info!(
        original = %original_key,
        masked = %masked_key,
        expires_at = %original.expires_at,
        "background removal complete"
    );

    // Stage 5: success
    Json(RemoveResponse {
        original_image_url: original.url,
        background_removed_image_url: masked_presigned.url,
    })
    .into_response()
}
