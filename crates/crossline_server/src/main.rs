//! Crossline - tic-tac-toe session server

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use crossline_engine::{InMemorySessionRepository, SessionService};
use crossline_server::{AppState, ServerConfig, router};
use std::path::PathBuf;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => run_http_server(config, host, port).await,
    }
}

/// Run the HTTP game server
async fn run_http_server(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let config = ServerConfig::load(config_path.as_deref())?.with_overrides(host, port);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();

    serve(config).await
}

#[instrument(skip_all, fields(addr = %config.bind_address()))]
async fn serve(config: ServerConfig) -> Result<()> {
    info!("Starting Crossline server");

    let service = SessionService::new(InMemorySessionRepository::new());
    let app = router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Listening for requests");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
