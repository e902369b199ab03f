//! Server configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_chess::{ChessEngine, RulesEngine};
use tracing::{debug, info, instrument};

/// Environment variable that overrides the listening port.
pub const PORT_ENV: &str = "PORT";

/// Settings for one table server.
///
/// Resolved from defaults, then an optional TOML file, then the `PORT`
/// environment variable, then command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_", into, strip_option)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind to.
    host: String,

    /// Port to listen on.
    port: u16,

    /// Starting position as FEN. The standard opening when absent.
    initial_position: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            initial_position: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// Only `PORT` is consulted. An unparseable value is an error rather
    /// than silently ignored.
    #[instrument(skip(self, lookup))]
    pub fn apply_env(self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match lookup(PORT_ENV) {
            Some(raw) => {
                let port = raw.trim().parse::<u16>().map_err(|e| {
                    ConfigError::new(format!("Invalid {} value {:?}: {}", PORT_ENV, raw, e))
                })?;
                debug!(port, "Port taken from environment");
                Ok(self.with_port(port))
            }
            None => Ok(self),
        }
    }

    /// Builds the rules engine at the configured starting position.
    #[instrument(skip(self))]
    pub fn build_engine(&self) -> Result<ChessEngine, ConfigError> {
        let mut engine = ChessEngine::new();
        if let Some(fen) = &self.initial_position {
            engine
                .load(fen)
                .map_err(|e| ConfigError::new(format!("Invalid initial_position: {}", e)))?;
        }
        Ok(engine)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
