//! Desktop background removal tool
//!
//! Interactive flow: a native "Select Image" dialog picks the input, a
//! "Save Image" dialog picks the output, the segmentation endpoint does the
//! work, and the result lands at the chosen path in the format implied by
//! its extension. Failures propagate and terminate the process.

use crate::config::OutputFormat;
use crate::remover::{BackgroundRemover, HttpRemover};
use crate::services::{ImageFormatService, ImageIoService};
use crate::tracing_config::TracingConfig;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

/// Default segmentation endpoint (a local rembg-style server)
const DEFAULT_ENDPOINT: &str = "http://localhost:7000/api/remove";

/// Remove the background from an image chosen via file dialogs
#[derive(Debug, Parser)]
#[command(name = "bgcut", version, about)]
pub struct Cli {
    /// Segmentation endpoint URL
    #[arg(long, env = "BGCUT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Binary entry point: parse arguments, initialize tracing, run the flow
pub async fn main() -> Result<()> {
    let cli = Cli::parse();

    TracingConfig::new().with_verbosity(cli.verbose).init()?;

    run(&cli).await
}

async fn run(cli: &Cli) -> Result<()> {
    let input_path = rfd::FileDialog::new()
        .set_title("Select Image")
        .add_filter("Images", &["png", "jpg", "jpeg", "webp", "bmp", "tiff"])
        .pick_file()
        .context("no input file selected")?;

    let output_path = rfd::FileDialog::new()
        .set_title("Save Image")
        .set_file_name(default_output_name(&input_path))
        .save_file()
        .context("no output path selected")?;

    let remover = HttpRemover::new(cli.endpoint.as_str())?;
    process_file(&remover, &input_path, &output_path).await
}

/// Load, segment, and save a single image
async fn process_file(
    remover: &dyn BackgroundRemover,
    input_path: &Path,
    output_path: &Path,
) -> Result<()> {
    tracing::info!(
        input = %input_path.display(),
        output = %output_path.display(),
        "removing background"
    );

    let bytes = std::fs::read(input_path)
        .with_context(|| format!("failed to read '{}'", input_path.display()))?;

    // Validate before spending a segmentation round-trip on garbage
    ImageFormatService::decode(&bytes)
        .with_context(|| format!("'{}' is not a decodable image", input_path.display()))?;

    let result_bytes = remover.remove_background(&bytes).await?;

    let result = ImageFormatService::decode(&result_bytes)
        .context("segmentation endpoint returned undecodable image data")?;

    ImageIoService::save_image(&result, output_path)?;

    tracing::info!(output = %output_path.display(), "done");
    Ok(())
}

/// Suggest an output file name next to the input: `<stem>-nobg.png`
///
/// PNG is the default so the transparent background survives the save.
fn default_output_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    format!("{stem}-nobg.{}", OutputFormat::Png.extension())
}
