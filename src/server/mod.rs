//! HTTP-triggered cloud handler
//!
//! Hosts the background-removal endpoint behind axum. Each request is
//! stateless; the shared [`AppContext`] only carries the storage client, the
//! segmentation capability, and the service configuration.

use crate::config::ServiceConfig;
use crate::remover::BackgroundRemover;
use crate::storage::ObjectStorage;
use anyhow::{Context, Result};
use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod routes;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    /// Object storage holding originals and masked results
    pub storage: Arc<dyn ObjectStorage>,
    /// Background segmentation capability
    pub remover: Arc<dyn BackgroundRemover>,
    /// HTTP client used to fetch `img_url` inputs
    pub http: reqwest::Client,
    /// Storage layout and processing parameters
    pub config: Arc<ServiceConfig>,
}

impl AppContext {
    /// Assemble a context from its collaborators
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        remover: Arc<dyn BackgroundRemover>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            storage,
            remover,
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }
}

/// Create the axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/remove",
            get(routes::remove_background).post(routes::remove_background),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Start the HTTP server and block until shutdown
pub async fn start_server(addr: SocketAddr, ctx: AppContext) -> Result<()> {
    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {},
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
