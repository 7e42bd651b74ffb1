// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KubedexError {
    #[error("Discovery source {source_name} unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("Discovery source {source_name} timed out after {timeout:?}")]
    SourceTimeout {
        source_name: String,
        timeout: Duration,
    },

    #[error("Credential lookup failed: {0}")]
    CredentialLookupFailed(String),

    #[error("Credential store error: {0}")]
    CredentialStoreError(String),

    #[error("Failed to persist cluster snapshot: {0}")]
    PersistenceFailed(String),

    #[error("Failed to parse kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Inventory service error: {0}")]
    InventoryError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, KubedexError>;
