// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! In-memory fakes for discovery sources, credential lookups and snapshot storage.

use crate::credentials::{CredentialHealth, CredentialHealthLookup};
use crate::error::{KubedexError, Result};
use crate::sources::{DiscoverySource, RegisteredSource};
use crate::store::SnapshotBackend;
use crate::sync::{PassProvider, SyncPass};
use crate::types::{AggregatedRecord, ClusterRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A source that always returns the same records
pub struct StaticSource {
    description: String,
    records: Vec<ClusterRecord>,
}

impl StaticSource {
    pub fn new(description: &str, records: Vec<ClusterRecord>) -> Self {
        Self {
            description: description.to_string(),
            records,
        }
    }
}

#[async_trait]
impl DiscoverySource for StaticSource {
    async fn list_clusters(&self) -> Result<Vec<ClusterRecord>> {
        Ok(self.records.clone())
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

/// A source whose listing always fails
pub struct FailingSource {
    description: String,
}

impl FailingSource {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
        }
    }
}

#[async_trait]
impl DiscoverySource for FailingSource {
    async fn list_clusters(&self) -> Result<Vec<ClusterRecord>> {
        Err(KubedexError::InventoryError("connection refused".to_string()))
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

/// A source that answers only after a delay
pub struct SlowSource {
    inner: StaticSource,
    delay: Duration,
}

impl SlowSource {
    pub fn new(description: &str, delay: Duration, records: Vec<ClusterRecord>) -> Self {
        Self {
            inner: StaticSource::new(description, records),
            delay,
        }
    }
}

#[async_trait]
impl DiscoverySource for SlowSource {
    async fn list_clusters(&self) -> Result<Vec<ClusterRecord>> {
        tokio::time::sleep(self.delay).await;
        self.inner.list_clusters().await
    }

    fn description(&self) -> String {
        self.inner.description()
    }
}

#[derive(Clone, Copy)]
enum Answer {
    Health(CredentialHealth),
    Fail,
}

/// Credential lookup backed by a fixed table; unknown ids are not found
#[derive(Default)]
pub struct StaticCredentials {
    answers: HashMap<String, Answer>,
    calls: AtomicUsize,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn healthy(mut self, id: &str) -> Self {
        self.answers
            .insert(id.to_string(), Answer::Health(CredentialHealth::Healthy));
        self
    }

    pub fn unhealthy(mut self, id: &str) -> Self {
        self.answers
            .insert(id.to_string(), Answer::Health(CredentialHealth::Unhealthy));
        self
    }

    /// Lookups for this id error out
    pub fn failing(mut self, id: &str) -> Self {
        self.answers.insert(id.to_string(), Answer::Fail);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CredentialHealthLookup for StaticCredentials {
    fn lookup(&self, cred_resolver_id: &str) -> Result<CredentialHealth> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.answers.get(cred_resolver_id) {
            Some(Answer::Health(health)) => Ok(*health),
            Some(Answer::Fail) => Err(KubedexError::CredentialLookupFailed(format!(
                "credential store unreadable while looking up {}",
                cred_resolver_id
            ))),
            None => Ok(CredentialHealth::NotFound),
        }
    }
}

/// Snapshot backend that keeps the last saved snapshot in memory
#[derive(Default)]
pub struct MemoryBackend {
    snapshot: Mutex<Option<Vec<AggregatedRecord>>>,
    saves: AtomicUsize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(records: Vec<AggregatedRecord>) -> Self {
        Self {
            snapshot: Mutex::new(Some(records)),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn saved(&self) -> Option<Vec<AggregatedRecord>> {
        self.snapshot.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotBackend for MemoryBackend {
    async fn load(&self) -> Result<Option<Vec<AggregatedRecord>>> {
        Ok(self.saved())
    }

    async fn save(&self, records: &[AggregatedRecord]) -> Result<()> {
        *self.snapshot.lock().unwrap() = Some(records.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Snapshot backend whose writes always fail
pub struct FailingBackend;

#[async_trait]
impl SnapshotBackend for FailingBackend {
    async fn load(&self) -> Result<Option<Vec<AggregatedRecord>>> {
        Ok(None)
    }

    async fn save(&self, _records: &[AggregatedRecord]) -> Result<()> {
        Err(KubedexError::PersistenceFailed("disk full".to_string()))
    }
}

/// Pass provider that hands out the same sources and credentials every pass
pub struct StaticPass {
    sources: Vec<RegisteredSource>,
    credentials: Arc<dyn CredentialHealthLookup>,
    passes: AtomicUsize,
}

impl StaticPass {
    pub fn new(
        sources: Vec<RegisteredSource>,
        credentials: impl CredentialHealthLookup + 'static,
    ) -> Self {
        Self {
            sources,
            credentials: Arc::new(credentials),
            passes: AtomicUsize::new(0),
        }
    }

    pub fn passes(&self) -> usize {
        self.passes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PassProvider for StaticPass {
    async fn next_pass(&self) -> Result<SyncPass> {
        self.passes.fetch_add(1, Ordering::SeqCst);
        Ok(SyncPass {
            sources: self.sources.clone(),
            credentials: self.credentials.clone(),
        })
    }
}
