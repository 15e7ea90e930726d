//! Desktop background removal tool
//!
//! Opens native file dialogs to pick an input image and an output path,
//! removes the background, and saves the result.

use bgcut::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::main().await
}
