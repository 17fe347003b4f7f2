//! Configuration management for Memories
//!
//! Loads settings from TOML file at ~/.memories/config.toml

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Owner assigned to every created memory until real authentication exists
pub const DEFAULT_OWNER_ID: &str = "aebfe41d-1d0a-4ff7-b233-df6ea9c1a7c7";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Owner identity configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Log output configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Data directory (defaults to ~/.memories)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".memories"))
        .unwrap_or_else(|| PathBuf::from(".memories"))
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server port (default: 3333)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Server host (default: 127.0.0.1 - localhost only)
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    3333
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Owner identity configuration
///
/// There is no login flow: every write is attributed to `owner_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_owner_id")]
    pub owner_id: String,
}

fn default_owner_id() -> String {
    DEFAULT_OWNER_ID.to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            owner_id: default_owner_id(),
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Directory for daily-rotated log files. Stdout only when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let expanded_path = expand_path(path.as_ref());

        if !expanded_path.exists() {
            return Err(CoreError::Config(format!(
                "Configuration file not found: {}",
                expanded_path.display()
            )));
        }

        let content = std::fs::read_to_string(&expanded_path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        default_data_dir().join("config.toml")
    }

    /// Get the data directory, expanding ~ if present
    pub fn data_dir(&self) -> PathBuf {
        expand_path(&self.data_dir)
    }

    /// Path of the SQLite database file
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join("memories.db")
    }

    /// Get the log directory, expanding ~ if present
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.logging.dir.as_deref().map(expand_path)
    }

    /// Get the server socket address
    pub fn server_addr(&self) -> SocketAddr {
        use std::net::ToSocketAddrs;

        format!("{}:{}", self.server.host, self.server.port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], self.server.port)))
    }

    /// Check settings that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if uuid::Uuid::try_parse(&self.auth.owner_id).is_err() {
            return Err(CoreError::Config(format!(
                "auth.owner_id must be a UUID, got {:?}",
                self.auth.owner_id
            )));
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("MEMORIES_SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("MEMORIES_SERVER_PORT") {
            self.server.port = port.parse().map_err(|_| {
                CoreError::Config(format!("invalid MEMORIES_SERVER_PORT: {:?}", port))
            })?;
        }
        if let Some(data_dir) = lookup("MEMORIES_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }
        if let Some(owner_id) = lookup("MEMORIES_OWNER_ID") {
            self.auth.owner_id = owner_id;
        }
        Ok(())
    }

    /// Create a default configuration file at the given path
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let content = format!(
            r#"# Memories Configuration

# Where the SQLite database lives
data_dir = "~/.memories"

[server]
# Port to listen on (default: 3333)
port = 3333

# Host to bind to
# "127.0.0.1" = localhost only
# "0.0.0.0" = all interfaces
host = "127.0.0.1"

[auth]
# Every created memory is owned by this user
owner_id = "{DEFAULT_OWNER_ID}"

[logging]
# Write daily-rotated log files here in addition to stdout
# dir = "~/.memories/logs"
"#
        );

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }
}

/// Expand ~ to home directory in paths
pub fn expand_path(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}
