//! Cloud background removal handler
//!
//! HTTP service that accepts an image by URL or embedded base64, stores the
//! original and the background-removed result in S3, and answers with
//! presigned download links.

use anyhow::Result;
use bgcut::remover::HttpRemover;
use bgcut::server::{start_server, AppContext};
use bgcut::storage::S3Storage;
use bgcut::tracing_config::TracingConfig;
use bgcut::ServiceConfig;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Default segmentation endpoint (a local rembg-style server)
const DEFAULT_ENDPOINT: &str = "http://localhost:7000/api/remove";

/// Background removal HTTP service
#[derive(Debug, Parser)]
#[command(name = "bgcut-server", version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "BGCUT_BIND", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// S3 bucket receiving originals and masked results
    #[arg(long, env = "BGCUT_BUCKET", default_value = "background-remover-bucket")]
    bucket: String,

    /// Custom S3-compatible endpoint (e.g. MinIO); AWS default when omitted
    #[arg(long, env = "BGCUT_S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// Segmentation endpoint URL
    #[arg(long, env = "BGCUT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Presigned URL expiry in seconds
    #[arg(long, env = "BGCUT_PRESIGN_TTL", default_value_t = 3600)]
    presign_ttl: u64,

    /// JPEG quality for stored originals (0-100)
    #[arg(long, env = "BGCUT_JPEG_QUALITY", default_value_t = 90)]
    jpeg_quality: u8,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    TracingConfig::new().with_verbosity(args.verbose).init()?;

    let config = ServiceConfig::builder()
        .bucket(args.bucket.as_str())
        .presign_ttl(Duration::from_secs(args.presign_ttl))
        .jpeg_quality(args.jpeg_quality)
        .build()?;

    let storage = match &args.s3_endpoint {
        Some(endpoint) => S3Storage::connect_with_endpoint(args.bucket.as_str(), endpoint).await,
        None => S3Storage::connect(args.bucket.as_str()).await,
    };

    let remover = HttpRemover::new(args.endpoint.as_str())?;

    tracing::info!(
        bucket = %args.bucket,
        endpoint = %args.endpoint,
        "cloud handler configured"
    );

    let ctx = AppContext::new(Arc::new(storage), Arc::new(remover), config);
    start_server(args.bind, ctx).await
}
