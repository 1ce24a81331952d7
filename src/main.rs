//! Counter Backend - Main Application
//!
//! A loopback HTTP backend for a desktop shell: one shared counter, plain
//! JSON routes, and a shutdown hook that exits after the response flushes.

use clap::Parser;
use counter_backend::{config::AppConfig, server::start_server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Counter Backend - Local HTTP service with a shared counter
#[derive(Parser)]
#[command(name = "counter-backend")]
#[command(about = "A local HTTP backend exposing a counter and a shutdown hook")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Server host
    #[arg(long, env = "COUNTER_BACKEND_SERVER_HOST")]
    host: Option<String>,

    /// Server port
    #[arg(short, long, env = "COUNTER_BACKEND_SERVER_PORT")]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("counter_backend={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = if std::path::Path::new(&cli.config).exists() {
        AppConfig::load_from_file(&cli.config).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load config file, using defaults");
            AppConfig::default()
        })
    } else {
        AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        })
    };

    // Override with CLI args
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        "Starting counter backend"
    );
    start_server(config).await?;

    Ok(())
}
