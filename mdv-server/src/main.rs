//! mdv-server - Mermaid diagram viewer
//!
//! Loads the diagram source file once at startup and serves it over HTTP.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mdv_common::config::{AppConfig, ConfigOverrides};
use mdv_common::DiagramStore;
use mdv_server::{build_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for mdv-server
///
/// Every option can also come from an `MDV_*` environment variable or the
/// TOML config file.
#[derive(Parser, Debug)]
#[command(name = "mdv-server")]
#[command(about = "Web viewer for Mermaid diagrams extracted from a text file")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Text file containing the numbered diagram sections
    #[arg(short, long)]
    diagram_file: Option<PathBuf>,

    /// Application name shown in page titles
    #[arg(long)]
    app_name: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_file: self.config.clone(),
            diagram_file: self.diagram_file.clone(),
            app_name: self.app_name.clone(),
            debug: self.debug.then_some(true),
            host: self.host.clone(),
            port: self.port,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(&args.overrides()).context("Failed to load configuration")?;

    // Initialize tracing
    let default_filter = format!(
        "mdv_server={level},mdv_common={level},tower_http={level}",
        level = config.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting {} (mdv-server) v{} [{}] built {} ({})",
        config.app_name,
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let store = DiagramStore::load(&config.diagram_file);
    info!(
        "Total diagrams loaded: {} (source: {})",
        store.len(),
        store.source().kind()
    );

    let state = AppState::new(store, config.app_name.clone());
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("mdv-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

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
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
