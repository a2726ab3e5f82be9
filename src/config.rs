//! ==============================================================================
//! config.rs - Receiver Configuration Loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `receiver.toml`.
//!     loads configuration from file or falls back to defaults.
//!
//! structure:
//!     - ServerConfig: Bind address and port for the HTTP listener.
//!     - LoggingConfig: Default log level (RUST_LOG still wins).
//!
//! ==============================================================================

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// environment variable that overrides `server.port`
pub const PORT_ENV: &str = "PORT";

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ReceiverConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_address: "0.0.0.0".to_string(), port: 3000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl ReceiverConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Find and load the first config file that exists
    ///
    /// Returns `Ok(None)` when no candidate exists. Runs before logging is
    /// set up, so the caller reports the outcome.
    pub fn discover() -> Result<Option<(PathBuf, Self)>> {
        let paths = [
            PathBuf::from("config").join("receiver.toml"),
            PathBuf::from("..").join("config").join("receiver.toml"),
        ];

        for path in paths {
            if path.exists() {
                let config = Self::load(&path)?;
                return Ok(Some((path, config)));
            }
        }
        Ok(None)
    }

    /// Apply `PORT` from the environment, if set
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var(PORT_ENV) {
            self.apply_port_override(&port)?;
        }
        Ok(())
    }

    fn apply_port_override(&mut self, port: &str) -> Result<()> {
        self.server.port = port
            .trim()
            .parse()
            .with_context(|| format!("{} must be a port number, got {:?}", PORT_ENV, port))?;
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.bind_address, self.server.port)
            .parse()
            .with_context(|| format!("Invalid bind address {:?}", self.server.bind_address))
    }
}
