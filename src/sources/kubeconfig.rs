// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Local kubeconfig discovery source

use crate::error::{KubedexError, Result};
use crate::sources::DiscoverySource;
use crate::types::ClusterRecord;
use async_trait::async_trait;
use kube::config::Kubeconfig;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Lists the contexts of a local kubeconfig file. Clusters found here are registered.
#[derive(Debug, Clone)]
pub struct KubeconfigSource {
    path: PathBuf,
}

impl KubeconfigSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl DiscoverySource for KubeconfigSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn list_clusters(&self) -> Result<Vec<ClusterRecord>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Kubeconfig does not exist, no registered clusters");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        parse_context_names(&raw).map(|names| names.into_iter().map(ClusterRecord::new).collect())
    }

    fn description(&self) -> String {
        format!("Kubeconfig:{}", self.path.display())
    }
}

/// Distinct context names of a kubeconfig document
fn parse_context_names(raw: &str) -> Result<BTreeSet<String>> {
    if raw.trim().is_empty() {
        return Ok(BTreeSet::new());
    }

    let kubeconfig: Kubeconfig = serde_yaml::from_str(raw)
        .map_err(|e| KubedexError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))?;

    Ok(kubeconfig
        .contexts
        .into_iter()
        .map(|c| c.name)
        .filter(|name| !name.is_empty())
        .collect())
}
