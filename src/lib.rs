//! Memories - small HTTP service for memory notes
//!
//! A memory is a short text with a cover image URL and a visibility flag.
//! This crate provides:
//! - SQLite storage for memory records
//! - HTTP API with list, get, create, update and delete endpoints
//!
//! # Usage
//!
//! As a library:
//! ```ignore
//! use memories::{Config, Core};
//!
//! let core = Core::new(Config::default())?;
//! core.start_api_server().await?;
//! ```
//!
//! As a standalone server (CLI):
//! ```text
//! memories --config ~/.memories/config.toml
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;

// Re-export main types for convenience
pub use config::Config;
pub use db::Database;
pub use error::{CoreError, Result};

/// Core service that owns configuration and storage
pub struct Core {
    /// Configuration
    pub config: Config,

    /// Database connection
    pub db: Database,
}

impl Core {
    /// Create a new Core instance with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let db = Database::new(config.database_path())?;
        Ok(Core { config, db })
    }

    /// Create a Core instance with an existing database
    pub fn with_database(config: Config, db: Database) -> Result<Self> {
        config.validate()?;
        Ok(Core { config, db })
    }

    /// Shared state for the HTTP handlers
    pub fn app_state(&self) -> api::AppState {
        api::AppState::new(self.db.clone(), &self.config.auth.owner_id)
    }

    /// Start the HTTP API server (blocks until shutdown)
    pub async fn start_api_server(&self) -> Result<()> {
        let addr = self.config.server_addr();
        tracing::info!("Starting API server on {}", addr);
        api::serve(addr, self.app_state()).await
    }
}
