// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Credential resolver store and health lookups.

use crate::error::{KubedexError, Result};
use crate::types::CredResolverConfig;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, instrument};

/// Outcome of a credential health check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialHealth {
    NotFound,
    Healthy,
    Unhealthy,
}

/// Reports whether a credential resolver exists and is usable
pub trait CredentialHealthLookup: Send + Sync {
    /// An `Err` means the check itself could not be performed.
    fn lookup(&self, cred_resolver_id: &str) -> Result<CredentialHealth>;
}

/// Credential resolvers loaded from a JSON file, keyed by id
#[derive(Debug, Clone, Default)]
pub struct FileCredResolverStore {
    configs: BTreeMap<String, CredResolverConfig>,
}

impl FileCredResolverStore {
    pub fn new(configs: Vec<CredResolverConfig>) -> Self {
        Self {
            configs: configs.into_iter().map(|c| (c.id.clone(), c)).collect(),
        }
    }

    /// Load resolvers from `path`. A missing file means no resolvers are configured.
    #[instrument]
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = match tokio::fs::read(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No credential resolvers configured at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(KubedexError::CredentialStoreError(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let configs: Vec<CredResolverConfig> = serde_json::from_slice(&raw).map_err(|e| {
            KubedexError::CredentialStoreError(format!(
                "Failed to parse {}: {}",
                path.display(),
                e
            ))
        })?;

        info!(
            "Loaded {} credential resolvers from {}",
            configs.len(),
            path.display()
        );
        Ok(Self::new(configs))
    }

    pub fn list(&self) -> Vec<CredResolverConfig> {
        self.configs.values().cloned().collect()
    }

    /// Get a resolver by id. An empty id is never a valid key.
    pub fn get(&self, cred_resolver_id: &str) -> Result<Option<&CredResolverConfig>> {
        if cred_resolver_id.is_empty() {
            return Err(KubedexError::CredentialLookupFailed(
                "credential resolver id must not be empty".to_string(),
            ));
        }
        Ok(self.configs.get(cred_resolver_id))
    }
}

impl CredentialHealthLookup for FileCredResolverStore {
    fn lookup(&self, cred_resolver_id: &str) -> Result<CredentialHealth> {
        Ok(match self.get(cred_resolver_id)? {
            None => CredentialHealth::NotFound,
            Some(config) if config.is_ok() => CredentialHealth::Healthy,
            Some(_) => CredentialHealth::Unhealthy,
        })
    }
}
