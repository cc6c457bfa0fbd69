//! vite-axum demo server.
//!
//! Serves two host routes (`/hello`, `/api`) and hands everything else to
//! the front-end dev server (development) or its build output (production).

use std::path::PathBuf;

use axum::{routing::get, Router};
use clap::Parser;

use vite_axum::config::{load_config, BridgeConfig};
use vite_axum::lifecycle::signals;
use vite_axum::observability::init_logging;

#[derive(Parser)]
#[command(name = "vite-axum")]
#[command(about = "Serve an axum app with a front-end dev server or build output", long_about = None)]
struct Cli {
    /// Port to listen on.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level; overrides the config file.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BridgeConfig::default(),
    };

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    init_logging(level);

    tracing::info!(port = cli.port, "vite-axum v0.1.0 starting");

    let app = Router::new()
        .route("/hello", get(|| async { "Hello from vite-axum!" }))
        .route("/api", get(|| async { "Response from API!" }));

    let server = vite_axum::listen(app, cli.port, &config, |addr| {
        tracing::info!(address = %addr, "Ready");
    })
    .await?;

    tokio::select! {
        _ = signals::ctrl_c() => {}
        _ = server.closed() => tracing::warn!("Server stopped before shutdown was requested"),
    }
    server.close().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
