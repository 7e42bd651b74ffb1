// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Central coordinator for cluster discovery passes.

use crate::constants::sync::EVENT_CHANNEL_CAPACITY;
use crate::credentials::CredentialHealthLookup;
use crate::engine::{resolve_status, Merger};
use crate::error::{KubedexError, Result};
use crate::sources::RegisteredSource;
use crate::store::AggregatedStore;
use crate::sync::pass::PassProvider;
use crate::types::{AggregatedRecord, ClusterRecord, Status};
use anyhow::bail;
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, instrument};

/// Requests the SyncManager handles between scheduled passes
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// Run a discovery pass now
    ResyncRequested,
    /// Run a discovery pass only when the snapshot is older than the resync interval
    RefreshIfStale,
    /// A cluster was written to the local kubeconfig
    MarkRegistered { name: String },
}

/// Summary of one finished pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub sources_total: usize,
    /// Descriptions of sources that failed or timed out
    pub sources_failed: Vec<String>,
    pub clusters: usize,
    pub by_status: BTreeMap<Status, usize>,
}

/// Runs discovery passes and keeps the aggregated store up to date
pub struct SyncManager {
    store: Arc<AggregatedStore>,
    source_timeout: Duration,
    event_rx: mpsc::Receiver<SyncEvent>,
}

/// Handle to send events to the SyncManager
#[derive(Clone)]
pub struct SyncManagerHandle {
    event_tx: mpsc::Sender<SyncEvent>,
}

impl SyncManagerHandle {
    pub async fn send(&self, event: SyncEvent) {
        if let Err(e) = self.event_tx.send(event).await {
            error!("Failed to send event to SyncManager: {}", e);
        }
    }

    pub async fn request_sync(&self) {
        self.send(SyncEvent::ResyncRequested).await;
    }

    pub async fn refresh_if_stale(&self) {
        self.send(SyncEvent::RefreshIfStale).await;
    }

    pub async fn mark_registered(&self, name: impl Into<String>) {
        self.send(SyncEvent::MarkRegistered { name: name.into() })
            .await;
    }
}

impl SyncManager {
    pub fn new(store: Arc<AggregatedStore>, source_timeout: Duration) -> (Self, SyncManagerHandle) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let manager = Self {
            store,
            source_timeout,
            event_rx,
        };

        let handle = SyncManagerHandle { event_tx };
        (manager, handle)
    }

    pub fn store(&self) -> &Arc<AggregatedStore> {
        &self.store
    }

    /// Sync once, then again whenever the snapshot goes stale or a pass is requested,
    /// until all handles are dropped. Sources and credentials are re-enumerated for
    /// every pass. Failed passes are logged and retried on the next tick.
    pub async fn run(
        mut self,
        provider: Arc<dyn PassProvider>,
        resync_interval: Duration,
    ) -> anyhow::Result<()> {
        if resync_interval.is_zero() {
            bail!("resync interval must be greater than zero");
        }

        info!("SyncManager started, performing initial sync...");
        self.sync_and_log(provider.as_ref()).await;
        info!("Initial sync complete, listening for events...");

        let mut ticker = time::interval_at(time::Instant::now() + resync_interval, resync_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.store.should_resync(resync_interval).await {
                        self.sync_and_log(provider.as_ref()).await;
                    } else {
                        debug!("Snapshot is fresh, skipping scheduled sync");
                    }
                }
                event = self.event_rx.recv() => match event {
                    Some(event) => {
                        if self.handle_event(event, provider.as_ref(), resync_interval).await {
                            ticker.reset();
                        }
                    }
                    None => break,
                },
            }
        }

        info!("All SyncManager handles dropped, stopping");
        Ok(())
    }

    /// Returns whether a discovery pass ran
    async fn handle_event(
        &self,
        event: SyncEvent,
        provider: &dyn PassProvider,
        resync_interval: Duration,
    ) -> bool {
        debug!("Handling event: {:?}", event);

        match event {
            SyncEvent::ResyncRequested => {
                self.sync_and_log(provider).await;
                true
            }
            SyncEvent::RefreshIfStale => {
                if self.store.should_resync(resync_interval).await {
                    self.sync_and_log(provider).await;
                    true
                } else {
                    info!("Snapshot synced within {:?}, skipping refresh", resync_interval);
                    false
                }
            }
            SyncEvent::MarkRegistered { name } => {
                match self.store.mark_registered(&name).await {
                    Ok(true) => info!("Cluster '{}' marked as registered", name),
                    Ok(false) => info!(
                        "Cluster '{}' is not in the snapshot, skipping registration update",
                        name
                    ),
                    Err(e) => error!("Failed to mark cluster '{}' as registered: {}", name, e),
                }
                false
            }
        }
    }

    async fn sync_and_log(&self, provider: &dyn PassProvider) {
        if let Err(e) = self.sync_with(provider).await {
            error!("Cluster sync failed: {}", e);
        }
    }

    /// Enumerate sources and credentials for this pass, then sync against them
    pub async fn sync_with(&self, provider: &dyn PassProvider) -> Result<SyncReport> {
        let pass = provider.next_pass().await?;
        self.sync(&pass.sources, pass.credentials.as_ref()).await
    }

    /// Query every source, merge their clusters in registration order, resolve a
    /// status for each and replace the store. Only a persistence failure fails the pass.
    #[instrument(skip(self, sources, credentials), fields(sources = sources.len()))]
    pub async fn sync(
        &self,
        sources: &[RegisteredSource],
        credentials: &dyn CredentialHealthLookup,
    ) -> Result<SyncReport> {
        for source in sources {
            debug!(
                "Source {} (authoritative={})",
                source.description(),
                source.authoritative
            );
        }

        // Results come back in input order, whatever order the calls finish in
        let results = join_all(sources.iter().map(|s| self.query_source(s))).await;

        let mut report = SyncReport {
            sources_total: sources.len(),
            ..Default::default()
        };
        let mut merger = Merger::new();
        for (source, result) in sources.iter().zip(results) {
            let description = source.description();
            match result {
                Ok(records) => {
                    info!(
                        "Source {} resolved {} clusters",
                        description,
                        records.len()
                    );
                    merger.fold(&description, source.authoritative, records);
                }
                Err(e) => {
                    error!("Skipping source {}: {}", description, e);
                    report.sources_failed.push(description);
                }
            }
        }

        let outcome = merger.finish();
        let registered = &outcome.registered;
        let records: Vec<AggregatedRecord> = outcome
            .clusters
            .into_values()
            .map(|cluster| {
                let locally_registered = registered.contains(&cluster.record.cluster_name);
                let status = resolve_status(&cluster, locally_registered, credentials);
                cluster.with_status(status)
            })
            .collect();

        report.clusters = records.len();
        for record in &records {
            *report.by_status.entry(record.status).or_default() += 1;
        }

        self.store.replace_and_persist(records).await?;

        info!(
            "Sync complete: {} clusters from {}/{} sources",
            report.clusters,
            report.sources_total - report.sources_failed.len(),
            report.sources_total
        );
        Ok(report)
    }

    async fn query_source(&self, source: &RegisteredSource) -> Result<Vec<ClusterRecord>> {
        match time::timeout(self.source_timeout, source.source.list_clusters()).await {
            Ok(Ok(records)) => Ok(records),
            Ok(Err(e)) => Err(KubedexError::SourceUnavailable {
                source_name: source.description(),
                reason: e.to_string(),
            }),
            Err(_) => Err(KubedexError::SourceTimeout {
                source_name: source.description(),
                timeout: self.source_timeout,
            }),
        }
    }
}
