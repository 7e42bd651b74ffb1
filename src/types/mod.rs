// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster and credential resolver data model.

pub mod cluster;
pub mod cred_resolver;

pub use cluster::{AggregatedRecord, ClusterRecord, CredentialAxis, MergedCluster, Provenance, Status};
pub use cred_resolver::{CredResolverConfig, CredResolverKind, CredResolverStatus, InfraVendor};
