// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The aggregated cluster snapshot and its persistence.

pub mod backend;

pub use backend::{JsonFileBackend, SnapshotBackend};

use crate::error::{KubedexError, Result};
use crate::types::AggregatedRecord;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Default)]
struct Snapshot {
    records: BTreeMap<String, AggregatedRecord>,
    last_synced: Option<Instant>,
}

/// Last computed cluster snapshot, shared between the sync loop and readers
pub struct AggregatedStore {
    snapshot: RwLock<Snapshot>,
    backend: Arc<dyn SnapshotBackend>,
}

impl AggregatedStore {
    /// Empty store; nothing is read from the backend
    pub fn new(backend: Arc<dyn SnapshotBackend>) -> Self {
        Self {
            snapshot: RwLock::new(Snapshot::default()),
            backend,
        }
    }

    /// Store seeded with the backend's last durable snapshot
    pub async fn open(backend: Arc<dyn SnapshotBackend>) -> Result<Self> {
        let records = backend.load().await?.unwrap_or_default();
        info!("Loaded {} clusters from the persisted snapshot", records.len());

        Ok(Self {
            snapshot: RwLock::new(Snapshot {
                records: index_by_name(records),
                last_synced: None,
            }),
            backend,
        })
    }

    pub async fn list(&self) -> Vec<AggregatedRecord> {
        self.snapshot.read().await.records.values().cloned().collect()
    }

    pub async fn get(&self, cluster_name: &str) -> Option<AggregatedRecord> {
        self.snapshot.read().await.records.get(cluster_name).cloned()
    }

    pub async fn len(&self) -> usize {
        self.snapshot.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Promote a cluster to registered, keeping its credential health. Returns
    /// `Ok(false)` without touching anything when the cluster is unknown.
    #[instrument(skip(self))]
    pub async fn mark_registered(&self, cluster_name: &str) -> Result<bool> {
        let mut snapshot = self.snapshot.write().await;

        let Some(entry) = snapshot.records.get_mut(cluster_name) else {
            debug!("Cluster not in snapshot, nothing to mark as registered");
            return Ok(false);
        };

        let promoted = entry.status.registered();
        if entry.status == promoted {
            return Ok(true);
        }
        info!("Cluster status {} -> {}", entry.status, promoted);
        entry.status = promoted;

        let records: Vec<AggregatedRecord> = snapshot.records.values().cloned().collect();
        self.persist(&records).await?;
        Ok(true)
    }

    /// Swap in a new snapshot and write it to the backend, all under one write lock.
    /// When persisting fails the in-memory snapshot already holds the new records.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn replace_and_persist(&self, records: Vec<AggregatedRecord>) -> Result<()> {
        let mut snapshot = self.snapshot.write().await;

        snapshot.records = index_by_name(records);
        snapshot.last_synced = Some(Instant::now());

        let records: Vec<AggregatedRecord> = snapshot.records.values().cloned().collect();
        self.persist(&records).await?;

        info!("Snapshot replaced with {} clusters", records.len());
        Ok(())
    }

    /// When the last successful replace happened in this process
    pub async fn last_synced(&self) -> Option<Instant> {
        self.snapshot.read().await.last_synced
    }

    pub async fn should_resync(&self, interval: Duration) -> bool {
        match self.last_synced().await {
            Some(at) => at.elapsed() >= interval,
            None => true,
        }
    }

    async fn persist(&self, records: &[AggregatedRecord]) -> Result<()> {
        self.backend.save(records).await.map_err(|e| match e {
            KubedexError::PersistenceFailed(_) => e,
            other => KubedexError::PersistenceFailed(other.to_string()),
        })
    }
}

fn index_by_name(records: Vec<AggregatedRecord>) -> BTreeMap<String, AggregatedRecord> {
    let mut indexed = BTreeMap::new();
    for record in records {
        if record.source_descriptions.is_empty() {
            warn!(
                "Cluster {} has no source descriptions, dropping it",
                record.cluster_name()
            );
            continue;
        }
        let name = record.cluster_name().to_string();
        if indexed.insert(name.clone(), record).is_some() {
            warn!("Duplicate cluster {} in snapshot, keeping the last one", name);
        }
    }
    indexed
}
