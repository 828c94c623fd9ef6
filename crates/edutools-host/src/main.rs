//! Educator Tools console host entry point.

use std::error::Error;
use std::sync::Arc;

use edutools_core::storage::{MemoryStorage, PropertyStorage};
use edutools_host::config::{HostConfig, LogFormat, load_teams};
use edutools_host::console::ConsolePresenter;
use edutools_host::setup::build_registry;
use edutools_modules::bootstrap;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Read configuration from environment.
    let config = HostConfig::from_env()?;

    // Initialize tracing subscriber. Logs go to stderr so dialogs stay
    // readable on stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }

    tracing::info!(player = %config.player, "Starting educator tools console host");

    let teams = match &config.teams_file {
        Some(path) => load_teams(path).await?,
        None => Vec::new(),
    };

    // Build modules and scenes.
    let storage: Arc<dyn PropertyStorage> = Arc::new(MemoryStorage::new());
    let registry = build_registry(storage, &config, teams)?;
    let tools = bootstrap(registry)?;

    // Run one menu session on the terminal.
    let presenter = ConsolePresenter::stdio();
    let end = tools.run(config.player.clone(), &presenter).await?;
    tracing::info!(?end, "Session finished");

    Ok(())
}
