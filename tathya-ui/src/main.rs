//! Tathya dashboard - main entry point
//!
//! Serves the browser dashboard and bridges it to the backend API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;

use tathya_common::config;
use tathya_ui::backend::{HttpBackend, DEFAULT_API_URL};
use tathya_ui::{build_router, AppState};

/// Command-line arguments for tathya-ui
#[derive(Parser, Debug)]
#[command(name = "tathya-ui")]
#[command(about = "Browser dashboard for the Tathya misinformation detector")]
#[command(version)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "TATHYA_UI_PORT")]
    port: Option<u16>,

    /// Base URL of the backend API
    #[arg(long, env = "TATHYA_API_URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Tathya Dashboard (tathya-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let toml_config = config::load_toml_config(args.config.as_deref())?;
    let port = args.port.unwrap_or(toml_config.ui_port);
    let api_url = args
        .api_url
        .or_else(|| toml_config.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    info!("Backend API: {}", api_url);

    let backend = Arc::new(HttpBackend::new(api_url));
    let state = AppState::new(backend);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("tathya-ui listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}
