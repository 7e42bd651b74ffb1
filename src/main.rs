// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kubedex::config::Config;
use kubedex::store::{AggregatedStore, JsonFileBackend};
use kubedex::sync::{ConfigPassProvider, SyncManager};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting kubedex");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: store={}, kubeconfigs={}, inventory={}",
        config.store_path.display(),
        config.kubeconfig_paths.len(),
        config
            .inventory_address
            .as_ref()
            .map(|u| u.as_str())
            .unwrap_or("disabled")
    );

    let backend = Arc::new(JsonFileBackend::new(config.store_path.clone()));
    let store = Arc::new(
        AggregatedStore::open(backend)
            .await
            .context("Failed to open cluster snapshot")?,
    );

    // Cloud vendor discovery backends are provided by embedding applications
    let provider = Arc::new(ConfigPassProvider::new(config.clone(), None));

    let (sync_manager, sync_handle) = SyncManager::new(store, config.source_timeout);

    info!("Starting sync loop, resyncing every {:?}", config.resync_interval);

    tokio::select! {
        result = sync_manager.run(provider, config.resync_interval) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl-C, shutting down");
        }
    }

    drop(sync_handle);
    Ok(())
}
