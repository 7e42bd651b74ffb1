// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Durable snapshot storage

use crate::error::{KubedexError, Result};
use crate::types::AggregatedRecord;
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Blob storage for the full aggregated snapshot
#[async_trait]
pub trait SnapshotBackend: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet
    async fn load(&self) -> Result<Option<Vec<AggregatedRecord>>>;

    /// Replace the stored snapshot. Either the whole snapshot is written or nothing is.
    async fn save(&self, records: &[AggregatedRecord]) -> Result<()>;
}

/// Snapshot stored as a JSON document, replaced via temp file + rename
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotBackend for JsonFileBackend {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Option<Vec<AggregatedRecord>>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No snapshot on disk yet");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&raw)?))
    }

    #[instrument(skip(self, records), fields(path = %self.path.display(), count = records.len()))]
    async fn save(&self, records: &[AggregatedRecord]) -> Result<()> {
        let body = serde_json::to_vec_pretty(records)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomically(&path, &body))
            .await
            .map_err(|e| KubedexError::PersistenceFailed(format!("Snapshot writer panicked: {}", e)))?
            .map_err(|e| KubedexError::PersistenceFailed(e.to_string()))?;

        debug!("Snapshot written");
        Ok(())
    }
}

fn write_atomically(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(body)?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
