//! Strictly Relay - chess table server binary.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use strictly_relay::{Cli, SharedTable, Table, serve};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("info,strictly_relay=debug,strictly_chess=debug")
            }),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.server_config(|key| std::env::var(key).ok())?;
    info!(host = %config.host(), port = config.port(), "Starting Strictly Relay");

    let engine = config.build_engine()?;
    let table = SharedTable::new(Table::new(engine));

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!("Server ready at http://{}:{}/", config.host(), config.port());

    serve(listener, table, shutdown_signal()).await?;
    info!("Server stopped");

    Ok(())
}

#[instrument]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
