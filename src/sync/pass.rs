// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-pass enumeration of discovery sources and credential state.

use crate::config::Config;
use crate::credentials::{CredentialHealthLookup, FileCredResolverStore};
use crate::error::Result;
use crate::sources::{build_sources, RegisteredSource, VendorSourceFactory};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Everything one discovery pass runs against
pub struct SyncPass {
    pub sources: Vec<RegisteredSource>,
    pub credentials: Arc<dyn CredentialHealthLookup>,
}

/// Produces the sources and credential lookup for the next pass
#[async_trait]
pub trait PassProvider: Send + Sync {
    async fn next_pass(&self) -> Result<SyncPass>;
}

/// Re-reads the credential resolver file and re-enumerates sources on every pass
pub struct ConfigPassProvider {
    config: Config,
    vendors: Option<Arc<dyn VendorSourceFactory>>,
}

impl ConfigPassProvider {
    pub fn new(config: Config, vendors: Option<Arc<dyn VendorSourceFactory>>) -> Self {
        Self { config, vendors }
    }
}

#[async_trait]
impl PassProvider for ConfigPassProvider {
    #[instrument(skip(self))]
    async fn next_pass(&self) -> Result<SyncPass> {
        let cred_store = FileCredResolverStore::load(&self.config.cred_resolvers_path).await?;
        let sources = build_sources(&self.config, &cred_store, self.vendors.as_deref());

        Ok(SyncPass {
            sources,
            credentials: Arc::new(cred_store),
        })
    }
}
