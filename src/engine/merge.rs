// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Folds cluster records from many discovery sources into one record per cluster name.

use crate::types::{ClusterRecord, MergedCluster};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// The records one source returned, tagged with how the source was registered
#[derive(Debug, Clone)]
pub struct SourceBatch {
    pub description: String,
    pub authoritative: bool,
    pub records: Vec<ClusterRecord>,
}

/// Result of folding every batch of a pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub clusters: BTreeMap<String, MergedCluster>,
    /// Cluster names reported by at least one authoritative source
    pub registered: HashSet<String>,
}

impl MergeOutcome {
    pub fn is_registered(&self, cluster_name: &str) -> bool {
        self.registered.contains(cluster_name)
    }
}

/// Accumulator for one sync pass. Batches must be folded in source registration order.
#[derive(Debug, Default)]
pub struct Merger {
    outcome: MergeOutcome,
}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&mut self, description: &str, authoritative: bool, records: Vec<ClusterRecord>) {
        debug!(
            "Folding {} records from source {}",
            records.len(),
            description
        );

        for record in records {
            if authoritative {
                self.outcome.registered.insert(record.cluster_name.clone());
            }

            match self.outcome.clusters.get_mut(&record.cluster_name) {
                Some(existing) => {
                    merge_record(&mut existing.record, record);
                    existing.source_descriptions.push(description.to_string());
                }
                None => {
                    self.outcome.clusters.insert(
                        record.cluster_name.clone(),
                        MergedCluster {
                            record,
                            source_descriptions: vec![description.to_string()],
                        },
                    );
                }
            }
        }
    }

    pub fn fold_batch(&mut self, batch: SourceBatch) {
        self.fold(&batch.description, batch.authoritative, batch.records);
    }

    pub fn finish(self) -> MergeOutcome {
        self.outcome
    }
}

/// Merge a whole pass in one go
pub fn merge(batches: Vec<SourceBatch>) -> MergeOutcome {
    let mut merger = Merger::new();
    for batch in batches {
        merger.fold_batch(batch);
    }
    merger.finish()
}

/// Fold `incoming` into `acc`: the last non-empty credential resolver id wins,
/// tags are unioned with the later value winning. The cluster name never changes.
fn merge_record(acc: &mut ClusterRecord, incoming: ClusterRecord) {
    if !incoming.cred_resolver_id.is_empty() {
        acc.cred_resolver_id = incoming.cred_resolver_id;
    }
    acc.tags.extend(incoming.tags);
}
