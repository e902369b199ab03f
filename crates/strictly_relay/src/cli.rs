//! Command-line interface for strictly_relay.

use crate::config::{ConfigError, ServerConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Strictly Relay - two-player chess table server
#[derive(Parser, Debug)]
#[command(name = "strictly_relay")]
#[command(about = "Serve one chess table to two players and any number of observers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Port to bind to (overrides config file and PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Starting position as FEN
    #[arg(long)]
    pub fen: Option<String>,
}

impl Cli {
    /// Resolves the final configuration: file, then environment, then flags.
    #[instrument(skip(self, lookup))]
    pub fn server_config(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<ServerConfig, ConfigError> {
        let config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };
        let mut config = config.apply_env(lookup)?;

        if let Some(host) = &self.host {
            config = config.with_host(host.clone());
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(fen) = &self.fen {
            config = config.with_initial_position(fen.clone());
        }

        debug!(?config, "Resolved server configuration");
        Ok(config)
    }
}
