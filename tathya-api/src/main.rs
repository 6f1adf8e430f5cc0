//! Tathya backend API - main entry point
//!
//! Stores uploaded documents, records their path references, and forwards
//! queries to the external content-analysis service.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;

use tathya_api::analyzer::{HttpAnalyzer, DEFAULT_ANALYZER_URL};
use tathya_api::{build_router, AppState};
use tathya_common::config;
use tathya_common::db::init_database;

/// Command-line arguments for tathya-api
#[derive(Parser, Debug)]
#[command(name = "tathya-api")]
#[command(about = "Backend API for the Tathya misinformation detector")]
#[command(version)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "TATHYA_API_PORT")]
    port: Option<u16>,

    /// Root folder for the database and uploaded files
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Base URL of the external content-analysis service
    #[arg(long, env = "TATHYA_ANALYZER_URL")]
    analyzer_url: Option<String>,
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
        "Starting Tathya API (tathya-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let toml_config = config::load_toml_config(args.config.as_deref())?;
    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), &toml_config);
    let port = args.port.unwrap_or(toml_config.api_port);
    let analyzer_url = args
        .analyzer_url
        .or_else(|| toml_config.analyzer_url.clone())
        .unwrap_or_else(|| DEFAULT_ANALYZER_URL.to_string());

    info!("Root folder: {}", root_folder.display());
    info!("Analysis service: {}", analyzer_url);

    let db_path = config::database_path(&root_folder);
    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    let uploads_dir = config::uploads_dir(&root_folder);
    std::fs::create_dir_all(&uploads_dir)
        .with_context(|| format!("Failed to create upload directory {}", uploads_dir.display()))?;

    let analyzer = Arc::new(HttpAnalyzer::new(analyzer_url));
    let state = AppState::new(pool, uploads_dir, analyzer);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("tathya-api listening on http://{}", addr);

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
