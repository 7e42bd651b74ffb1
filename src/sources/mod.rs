// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Discovery sources and per-pass source enumeration.

pub mod inventory;
pub mod kubeconfig;

pub use inventory::InventorySource;
pub use kubeconfig::KubeconfigSource;

use crate::config::Config;
use crate::credentials::FileCredResolverStore;
use crate::error::Result;
use crate::types::{ClusterRecord, CredResolverConfig};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

/// Something that can list the clusters known to one external system
#[async_trait]
pub trait DiscoverySource: Send + Sync {
    async fn list_clusters(&self) -> Result<Vec<ClusterRecord>>;

    /// Human-readable identity, recorded as provenance on every merged cluster
    fn description(&self) -> String;
}

/// A source enabled for a sync pass
#[derive(Clone)]
pub struct RegisteredSource {
    pub source: Arc<dyn DiscoverySource>,
    /// Clusters from authoritative sources are locally registered
    pub authoritative: bool,
}

impl RegisteredSource {
    pub fn authoritative(source: impl DiscoverySource + 'static) -> Self {
        Self {
            source: Arc::new(source),
            authoritative: true,
        }
    }

    pub fn suggestion(source: impl DiscoverySource + 'static) -> Self {
        Self {
            source: Arc::new(source),
            authoritative: false,
        }
    }

    pub fn description(&self) -> String {
        self.source.description()
    }
}

impl std::fmt::Debug for RegisteredSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredSource")
            .field("description", &self.description())
            .field("authoritative", &self.authoritative)
            .finish()
    }
}

/// Builds the cloud vendor source for one credential resolver
pub trait VendorSourceFactory: Send + Sync {
    /// `Ok(None)` when no discovery backend exists for this resolver's vendor.
    fn create(&self, config: &CredResolverConfig) -> Result<Option<Arc<dyn DiscoverySource>>>;
}

/// Enumerate the sources enabled for the next sync pass, in registration order:
/// the inventory service (when configured), every local kubeconfig, then one
/// vendor source per stored credential resolver.
pub fn build_sources(
    config: &Config,
    cred_store: &FileCredResolverStore,
    vendors: Option<&dyn VendorSourceFactory>,
) -> Vec<RegisteredSource> {
    let mut sources = Vec::new();

    if let Some(address) = &config.inventory_address {
        sources.push(RegisteredSource::suggestion(InventorySource::new(
            address.clone(),
        )));
    }

    for path in &config.kubeconfig_paths {
        sources.push(RegisteredSource::authoritative(KubeconfigSource::new(
            path.clone(),
        )));
    }

    if let Some(vendors) = vendors {
        for cred in cred_store.list() {
            if !cred.infra_vendor.supports_discovery() {
                continue;
            }
            match vendors.create(&cred) {
                Ok(Some(source)) => sources.push(RegisteredSource {
                    source,
                    authoritative: false,
                }),
                Ok(None) => {}
                Err(e) => error!(
                    "Failed to create {} discovery source for resolver {}: {}",
                    cred.infra_vendor, cred.id, e
                ),
            }
        }
    }

    info!("Enabled {} discovery sources", sources.len());
    sources
}
