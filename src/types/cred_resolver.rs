// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Cloud vendor a credential resolver belongs to
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum InfraVendor {
    Aws,
    Azure,
    Tencent,
    Other(String),
}

impl InfraVendor {
    /// Vendors that have a cluster discovery API
    pub fn supports_discovery(&self) -> bool {
        !matches!(self, InfraVendor::Other(_))
    }
}

impl From<String> for InfraVendor {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("aws") {
            InfraVendor::Aws
        } else if value.eq_ignore_ascii_case("azure") {
            InfraVendor::Azure
        } else if value.eq_ignore_ascii_case("tencent") {
            InfraVendor::Tencent
        } else {
            InfraVendor::Other(value)
        }
    }
}

impl From<InfraVendor> for String {
    fn from(value: InfraVendor) -> Self {
        value.to_string()
    }
}

impl fmt::Display for InfraVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfraVendor::Aws => f.write_str("AWS"),
            InfraVendor::Azure => f.write_str("Azure"),
            InfraVendor::Tencent => f.write_str("Tencent"),
            InfraVendor::Other(name) => f.write_str(name),
        }
    }
}

/// How a resolver obtains credentials
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredResolverKind {
    #[default]
    Default,
    Env,
    Imds,
    Profile,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CredResolverStatus {
    #[serde(rename = "CRED_REGISTERED_OK")]
    Ok,
    #[serde(rename = "CRED_REGISTERED_NOT_OK")]
    NotOk,
    #[default]
    #[serde(rename = "CRED_UNKNOWN", other)]
    Unknown,
}

/// A locally configured credential resolver
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CredResolverConfig {
    pub id: String,
    pub infra_vendor: InfraVendor,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub account_alias: String,
    #[serde(default)]
    pub kind: CredResolverKind,
    #[serde(default)]
    pub status: CredResolverStatus,
    #[serde(default, rename = "resolverAttributes")]
    pub attributes: BTreeMap<String, String>,
}

impl CredResolverConfig {
    pub fn is_ok(&self) -> bool {
        self.status == CredResolverStatus::Ok
    }
}
