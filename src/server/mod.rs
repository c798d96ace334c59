//! HTTP front end: landing page, static assets and the prediction endpoint.

mod api;
mod error;
mod handlers;
pub mod pipeline;
mod state;

pub use api::create_router;
pub use error::PredictError;
pub use handlers::PredictRequest;
pub use pipeline::predict_next_close;
pub use state::{PredictionContext, PredictionSettings};

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::Cli;
use crate::config::SERVER;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: SERVER.host.to_string(),
            port: SERVER.port,
            static_dir: SERVER.static_dir.to_string(),
        }
    }
}

impl From<&Cli> for ServerConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            host: cli.host.clone(),
            port: cli.port,
            static_dir: cli.static_dir.clone(),
        }
    }
}

impl ServerConfig {
    // host may be a name (localhost) as well as an IP literal
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

async fn shutdown_signal(started_at: chrono::DateTime<chrono::Utc>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not install Ctrl+C handler, running until killed");
        std::future::pending::<()>().await;
    }
    let stopped_at = chrono::Utc::now();
    info!(
        stopped_at = %stopped_at.to_rfc3339(),
        uptime_secs = stopped_at.signed_duration_since(started_at).num_seconds(),
        "Shutdown signal received, stopping server gracefully"
    );
}

/// Bind and serve until Ctrl+C. In-flight requests are allowed to finish.
pub async fn run_server(config: ServerConfig, ctx: Arc<PredictionContext>) -> anyhow::Result<()> {
    let started_at = chrono::Utc::now();

    if !std::path::Path::new(&config.static_dir).exists() {
        warn!(static_dir = %config.static_dir, "Static directory not found, /static will return 404");
    }

    let app = create_router(ctx, &config.static_dir);
    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    let addr: SocketAddr = listener.local_addr()?;

    info!(
        address = %addr,
        pid = std::process::id(),
        started_at = %started_at.to_rfc3339(),
        "Prediction server listening (press ctrl+c to stop)"
    );
    info!(url = %format!("http://{}/predict", addr), "Prediction endpoint available");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(started_at))
        .await
        .context("Server terminated with an error")?;

    info!("Server shut down cleanly");
    Ok(())
}
