// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A cluster as reported by a single discovery source
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRecord {
    pub cluster_name: String,
    /// Opaque credential resolver id, empty when unset
    #[serde(default)]
    pub cred_resolver_id: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl ClusterRecord {
    pub fn new(cluster_name: impl Into<String>) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            ..Default::default()
        }
    }

    pub fn with_cred_resolver(mut self, id: impl Into<String>) -> Self {
        self.cred_resolver_id = id.into();
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn has_cred_resolver(&self) -> bool {
        !self.cred_resolver_id.is_empty()
    }
}

/// Whether a cluster is known to the local kubeconfig or only discovered elsewhere
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provenance {
    Registered,
    Suggestion,
}

/// Whether the credential resolver referenced by a cluster exists and is usable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CredentialAxis {
    Ok,
    NoCredResolver,
    CredResolverNotOk,
}

/// Actionable status of an aggregated cluster, provenance x credential health
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    #[serde(rename = "REGISTERED_OK")]
    RegisteredOk,
    #[serde(rename = "REGISTERED_NOTOK_NO_CRED_RESOLVER")]
    RegisteredNoCredResolver,
    #[serde(rename = "REGISTERED_NOTOK_CRED_RES_NOTOK")]
    RegisteredCredResolverNotOk,
    #[serde(rename = "SUGGESTION_OK")]
    SuggestionOk,
    #[serde(rename = "SUGGESTION_NOTOK_NO_CRED_RESOLVER")]
    SuggestionNoCredResolver,
    #[serde(rename = "SUGGESTION_NOTOK_CRED_RES_NOTOK")]
    SuggestionCredResolverNotOk,
}

impl Status {
    pub fn from_axes(provenance: Provenance, credential: CredentialAxis) -> Self {
        match (provenance, credential) {
            (Provenance::Registered, CredentialAxis::Ok) => Status::RegisteredOk,
            (Provenance::Registered, CredentialAxis::NoCredResolver) => {
                Status::RegisteredNoCredResolver
            }
            (Provenance::Registered, CredentialAxis::CredResolverNotOk) => {
                Status::RegisteredCredResolverNotOk
            }
            (Provenance::Suggestion, CredentialAxis::Ok) => Status::SuggestionOk,
            (Provenance::Suggestion, CredentialAxis::NoCredResolver) => {
                Status::SuggestionNoCredResolver
            }
            (Provenance::Suggestion, CredentialAxis::CredResolverNotOk) => {
                Status::SuggestionCredResolverNotOk
            }
        }
    }

    pub fn provenance(self) -> Provenance {
        match self {
            Status::RegisteredOk
            | Status::RegisteredNoCredResolver
            | Status::RegisteredCredResolverNotOk => Provenance::Registered,
            Status::SuggestionOk
            | Status::SuggestionNoCredResolver
            | Status::SuggestionCredResolverNotOk => Provenance::Suggestion,
        }
    }

    pub fn credential(self) -> CredentialAxis {
        match self {
            Status::RegisteredOk | Status::SuggestionOk => CredentialAxis::Ok,
            Status::RegisteredNoCredResolver | Status::SuggestionNoCredResolver => {
                CredentialAxis::NoCredResolver
            }
            Status::RegisteredCredResolverNotOk | Status::SuggestionCredResolverNotOk => {
                CredentialAxis::CredResolverNotOk
            }
        }
    }

    /// Same credential health, registered provenance
    pub fn registered(self) -> Self {
        Status::from_axes(Provenance::Registered, self.credential())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::RegisteredOk => "REGISTERED_OK",
            Status::RegisteredNoCredResolver => "REGISTERED_NOTOK_NO_CRED_RESOLVER",
            Status::RegisteredCredResolverNotOk => "REGISTERED_NOTOK_CRED_RES_NOTOK",
            Status::SuggestionOk => "SUGGESTION_OK",
            Status::SuggestionNoCredResolver => "SUGGESTION_NOTOK_NO_CRED_RESOLVER",
            Status::SuggestionCredResolverNotOk => "SUGGESTION_NOTOK_CRED_RES_NOTOK",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merge output for one cluster name, before a status has been resolved
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedCluster {
    pub record: ClusterRecord,
    /// One entry per contributing source, in fold order
    pub source_descriptions: Vec<String>,
}

impl MergedCluster {
    pub fn with_status(self, status: Status) -> AggregatedRecord {
        AggregatedRecord {
            record: self.record,
            source_descriptions: self.source_descriptions,
            status,
        }
    }
}

/// The single merged view of a cluster held by the store
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedRecord {
    #[serde(rename = "metadata")]
    pub record: ClusterRecord,
    #[serde(rename = "dataResolvers")]
    pub source_descriptions: Vec<String>,
    pub status: Status,
}

impl AggregatedRecord {
    pub fn cluster_name(&self) -> &str {
        &self.record.cluster_name
    }
}
