// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Classifies merged clusters by provenance and credential health.

use crate::credentials::{CredentialHealth, CredentialHealthLookup};
use crate::types::{CredentialAxis, MergedCluster, Provenance, Status};
use tracing::warn;

/// Credential health of a cluster's resolver. A failed lookup counts as unhealthy.
pub fn credential_axis(cred_resolver_id: &str, lookup: &dyn CredentialHealthLookup) -> CredentialAxis {
    if cred_resolver_id.is_empty() {
        return CredentialAxis::NoCredResolver;
    }

    match lookup.lookup(cred_resolver_id) {
        Ok(CredentialHealth::NotFound) => CredentialAxis::NoCredResolver,
        Ok(CredentialHealth::Healthy) => CredentialAxis::Ok,
        Ok(CredentialHealth::Unhealthy) => CredentialAxis::CredResolverNotOk,
        Err(e) => {
            warn!(
                "Credential lookup for resolver {} failed, treating it as not ok: {}",
                cred_resolver_id, e
            );
            CredentialAxis::CredResolverNotOk
        }
    }
}

pub fn resolve_status(
    cluster: &MergedCluster,
    locally_registered: bool,
    lookup: &dyn CredentialHealthLookup,
) -> Status {
    let provenance = if locally_registered {
        Provenance::Registered
    } else {
        Provenance::Suggestion
    };
    Status::from_axes(
        provenance,
        credential_axis(&cluster.record.cred_resolver_id, lookup),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::StaticCredentials;
    use crate::types::ClusterRecord;

    fn merged(cred_resolver_id: &str) -> MergedCluster {
        MergedCluster {
            record: ClusterRecord::new("c").with_cred_resolver(cred_resolver_id),
            source_descriptions: vec!["Local".to_string()],
        }
    }

    #[test]
    fn test_empty_id_has_no_resolver_without_calling_lookup() {
        let lookup = StaticCredentials::new();

        assert_eq!(credential_axis("", &lookup), CredentialAxis::NoCredResolver);
        assert_eq!(lookup.calls(), 0);
    }

    #[test]
    fn test_credential_axis_table() {
        let lookup = StaticCredentials::new()
            .healthy("good")
            .unhealthy("bad")
            .failing("broken");

        assert_eq!(credential_axis("good", &lookup), CredentialAxis::Ok);
        assert_eq!(credential_axis("bad", &lookup), CredentialAxis::CredResolverNotOk);
        assert_eq!(credential_axis("broken", &lookup), CredentialAxis::CredResolverNotOk);
        assert_eq!(credential_axis("missing", &lookup), CredentialAxis::NoCredResolver);
    }

    #[test]
    fn test_resolve_combines_both_axes() {
        let lookup = StaticCredentials::new().healthy("good").unhealthy("bad");

        assert_eq!(resolve_status(&merged("good"), true, &lookup), Status::RegisteredOk);
        assert_eq!(
            resolve_status(&merged(""), true, &lookup),
            Status::RegisteredNoCredResolver
        );
        assert_eq!(
            resolve_status(&merged("bad"), true, &lookup),
            Status::RegisteredCredResolverNotOk
        );
        assert_eq!(resolve_status(&merged("good"), false, &lookup), Status::SuggestionOk);
        assert_eq!(
            resolve_status(&merged("missing"), false, &lookup),
            Status::SuggestionNoCredResolver
        );
        assert_eq!(
            resolve_status(&merged("bad"), false, &lookup),
            Status::SuggestionCredResolverNotOk
        );
    }
}
