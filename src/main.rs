// src/main.rs
//! Hostbridge binary
//!
//! Boots the interception layer, loads an optional archive, and keeps the
//! bridge routing until shutdown. The host handle is left for the embedding
//! environment to install into the slot once its backend is up.

use anyhow::Result;
use hostbridge::archive::Archive;
use hostbridge::bridge::Bridge;
use hostbridge::intercept::ContextRegistry;
use hostbridge::observability::init_tracing;
use hostbridge::rpc::HostSlot;
use hostbridge::utils::config::BridgeConfig;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    info!("Starting hostbridge v{}", env!("CARGO_PKG_VERSION"));

    let config = BridgeConfig::load()?;
    info!("Configuration loaded: {:?}", config);

    let archive = match &config.archive_path {
        Some(path) => {
            let archive = Archive::from_json_file(path)?;
            info!("Loaded archive with {} entries from {}", archive.len(), path);
            Some(Arc::new(archive))
        }
        None => None,
    };

    let host = Arc::new(HostSlot::new());
    let registry = ContextRegistry::new(config.channel_capacity);

    let bridge = Bridge::with_standard_resolvers(config, archive, Arc::clone(&host));
    let handle = bridge.boot(&registry).await?;
    info!("Bridge booted; waiting for a host handle to be installed");

    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    info!("Received shutdown signal, cleaning up...");

    handle.shutdown();
    Ok(())
}
