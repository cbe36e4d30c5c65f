//! Codexcuse HTTP server binary entry point.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use codexcuse::ExcuseStore;
use codexcuse::server::{CliArgs, CodexcuseServer, ServerConfig};

/// `RUST_LOG` wins; `LOGGER_LEVEL` is honoured for existing deployments.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| {
            let level = std::env::var("LOGGER_LEVEL").unwrap_or_default();
            EnvFilter::try_new(logger_level_directive(&level))
        })
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Maps levels with no `tracing` counterpart onto the nearest one.
fn logger_level_directive(level: &str) -> &str {
    match level.trim() {
        l if l.eq_ignore_ascii_case("panic") || l.eq_ignore_ascii_case("fatal") => "error",
        "" => "info",
        l => l,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();

    let args = CliArgs::parse();
    let config = args.to_config().unwrap_or_else(|e| {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    });
    let server_config = ServerConfig::from(&args);

    if config.environment == "production" {
        tracing::info!("Starting in production mode");
    }
    tracing::info!("Opening excuse store with config: {:?}", config);

    let store = ExcuseStore::open(config).await.unwrap_or_else(|e| {
        tracing::error!("Failed to open excuse store: {}", e);
        std::process::exit(1);
    });

    let server = CodexcuseServer::new(Arc::new(store), server_config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
