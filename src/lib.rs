#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]

//! # bgcut
//!
//! Background removal from images via two thin entry points: a desktop tool
//! driven by native file dialogs, and an HTTP service that stores the
//! original and the background-removed result in S3 and answers with
//! time-limited presigned download links.
//!
//! Segmentation itself is delegated to an external collaborator behind the
//! [`remover::BackgroundRemover`] trait; object storage sits behind
//! [`storage::ObjectStorage`]. Both workflows are sequential pipelines with
//! no retries: the first failure terminates the invocation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bgcut::remover::HttpRemover;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let remover = HttpRemover::new("http://localhost:7000/api/remove")?;
//! let input = std::fs::read("input.jpg")?;
//! let output = bgcut::remove_background_from_bytes(&input, &remover).await?;
//! std::fs::write("output.png", output)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `gui` (default): native file dialogs for the desktop tool
//! - `server` (default): axum handler and S3-backed object storage
//! - `cli`: argument parsing and tracing subscriber setup, implied by both

pub mod config;
pub mod error;
pub mod input;
pub mod remover;
#[cfg(feature = "server")]
pub mod server;
pub mod services;
pub mod storage;

#[cfg(feature = "gui")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod tracing_config;

// Public API exports
pub use config::{OutputFormat, ServiceConfig, ServiceConfigBuilder, UPLOADED_IMAGE_NAME};
pub use error::{BgCutError, Result};
pub use input::{ImageSource, SourceImage};
pub use remover::{BackgroundRemover, HttpRemover, MockRemover};
pub use services::{ImageFormatService, ImageIoService};
pub use storage::{MemoryStorage, ObjectStorage, PresignedUrl, StoredObject};

#[cfg(feature = "server")]
pub use server::AppContext;
#[cfg(feature = "server")]
pub use storage::S3Storage;

#[cfg(feature = "cli")]
pub use tracing_config::{TracingConfig, TracingFormat};

/// Remove the background from an encoded image held in memory
///
/// Validates that the bytes decode as an image, then delegates to the given
/// capability. The returned bytes are whatever the capability produced,
/// typically PNG with an alpha channel.
///
/// # Errors
/// - The input bytes are not a decodable image
/// - The segmentation capability fails
pub async fn remove_background_from_bytes(
    image_bytes: &[u8],
    remover: &dyn BackgroundRemover,
) -> Result<Vec<u8>> {
    ImageFormatService::decode(image_bytes)?;
    remover.remove_background(image_bytes).await
}
