//! Server configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable overriding [`ServerConfig::database_url`].
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Environment variable overriding [`ServerConfig::port`].
pub const PORT_VAR: &str = "PORT";

/// Settings for the history server.
///
/// Layered from defaults, an optional TOML file, the environment and
/// finally command-line flags, each overriding the one before.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    host: String,
    /// Port to bind.
    port: u16,
    /// Path of the SQLite database file.
    database_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: "tictac_history.db".to_string(),
        }
    }
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
        info!(database = %config.database_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads defaults, then `path` if it exists, then the process environment.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) if path.exists() => Self::from_file(path)?,
            Some(path) => {
                info!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())
    }

    /// Applies `DATABASE_URL` and `PORT` as returned by `lookup`.
    #[instrument(skip(self, lookup))]
    pub fn apply_env(self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = self;
        if let Some(url) = lookup(DATABASE_URL_VAR) {
            debug!(database = %url, "Database from environment");
            config = config.with_database_url(url);
        }
        if let Some(port) = lookup(PORT_VAR) {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::new(format!("Invalid {PORT_VAR} '{port}': {e}")))?;
            debug!(port, "Port from environment");
            config = config.with_port(port);
        }
        Ok(config)
    }

    /// `host:port` for binding a listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
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
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
