//! Memories CLI - standalone HTTP server for memory notes

use clap::Parser;
use memories::config::expand_path;
use memories::{Config, Core};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "memories")]
#[command(author = "Memories Team")]
#[command(version)]
#[command(about = "Memories - HTTP service for memory notes", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "~/.memories/config.toml")]
    config: PathBuf,

    /// Override server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override server host
    #[arg(long)]
    host: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initialize a new config file with defaults
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config_path = expand_path(&args.config);

    // Load configuration
    let mut config = if config_path.exists() {
        Config::from_file(&config_path)?
    } else {
        Config::default()
    };

    // Environment first, CLI flags last
    config.apply_env_overrides()?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_logging(&config, args.verbose)?;

    // Handle --init flag
    if args.init {
        if config_path.exists() {
            tracing::warn!("Config file already exists: {}", config_path.display());
            return Ok(());
        }
        Config::create_default(&config_path)?;
        tracing::info!("Created default config at: {}", config_path.display());
        return Ok(());
    }

    if !config_path.exists() {
        tracing::warn!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
    }

    let core = Core::new(config)?;
    tracing::info!("Using database at {}", core.config.database_path().display());

    // Start API server (blocks until shutdown)
    core.start_api_server().await?;

    Ok(())
}

/// Initialize stdout logging plus an optional daily-rotated log file
fn init_logging(
    config: &Config,
    verbose: bool,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("memories={},tower_http=debug", log_level).into());

    let (file_layer, guard) = match config.log_dir() {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(dir, "memories.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    Ok(guard)
}
