//! Hub configuration
//!
//! Loaded from `builder-hub.toml` when present, then overridden by CLI
//! arguments and environment variables (see `main.rs`).

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::models::DeviceType;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub launcher: LauncherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to
    #[serde(default = "default_bind")]
    pub bind: IpAddr,

    /// HTTP port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Directory served under /static
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            http_port: default_http_port(),
            static_dir: default_static_dir(),
        }
    }
}

/// Storage settings. A missing database path leaves the hub unconfigured:
/// pages render setup instructions and the APIs refuse to touch storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database file
    #[serde(default)]
    pub database: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// "laptop" or anything else (treated as desktop)
    #[serde(default)]
    pub device_type: DeviceType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Editor executable, looked up on PATH
    #[serde(default = "default_editor")]
    pub editor: String,

    /// Arguments placed before the project path
    #[serde(default)]
    pub editor_args: Vec<String>,

    /// Pending launches allowed before the endpoint answers 503
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Finished launch records kept for the status endpoints
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            editor: default_editor(),
            editor_args: Vec::new(),
            queue_capacity: default_queue_capacity(),
            history_size: default_history_size(),
        }
    }
}

// Defaults
fn default_bind() -> IpAddr { IpAddr::V4(Ipv4Addr::LOCALHOST) }
fn default_http_port() -> u16 { 3000 }
fn default_static_dir() -> PathBuf { PathBuf::from("static") }
fn default_editor() -> String { "cursor".to_string() }
fn default_queue_capacity() -> usize { 32 }
fn default_history_size() -> usize { 100 }

impl Config {
    /// Read a TOML config file, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.bind, self.server.http_port)
    }

    pub fn storage_configured(&self) -> bool {
        self.storage.database.is_some()
    }
}
