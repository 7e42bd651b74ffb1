// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as vars, paths, sync};
use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the aggregated cluster snapshot is persisted
    pub store_path: PathBuf,
    /// JSON file holding the configured credential resolvers
    pub cred_resolvers_path: PathBuf,
    /// Local kubeconfig files; every cluster found in them counts as registered
    pub kubeconfig_paths: Vec<PathBuf>,
    /// Inventory service base URL, the inventory source is disabled when unset
    pub inventory_address: Option<Url>,
    pub source_timeout: Duration,
    pub resync_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let home = lookup("HOME").map(PathBuf::from);
        let under_home = |relative: &str| -> Result<PathBuf> {
            match &home {
                Some(home) => Ok(home.join(relative)),
                None => bail!("HOME is not set, cannot resolve default path {}", relative),
            }
        };

        let store_path = match lookup(vars::STORE_PATH) {
            Some(p) => PathBuf::from(p),
            None => under_home(&format!("{}/{}", paths::DATA_DIR, paths::STORE_FILE))?,
        };

        let cred_resolvers_path = match lookup(vars::CRED_RESOLVERS_PATH) {
            Some(p) => PathBuf::from(p),
            None => under_home(&format!(
                "{}/{}",
                paths::DATA_DIR,
                paths::CRED_RESOLVERS_FILE
            ))?,
        };

        let kubeconfig_paths = match lookup(vars::KUBECONFIG).filter(|v| !v.is_empty()) {
            Some(list) => env::split_paths(&list)
                .filter(|p| !p.as_os_str().is_empty())
                .collect(),
            None => vec![under_home(paths::KUBECONFIG)?],
        };

        let inventory_address = lookup(vars::INVENTORY_ADDRESS)
            .filter(|v| !v.trim().is_empty())
            .map(|v| {
                Url::parse(v.trim())
                    .with_context(|| format!("{} is not a valid URL: {}", vars::INVENTORY_ADDRESS, v))
            })
            .transpose()?;

        let source_timeout = Duration::from_secs(parse_secs(
            &lookup,
            vars::SOURCE_TIMEOUT_SECS,
            sync::SOURCE_TIMEOUT_SECS,
        )?);
        let resync_interval = Duration::from_secs(parse_secs(
            &lookup,
            vars::RESYNC_INTERVAL_SECS,
            sync::RESYNC_INTERVAL_SECS,
        )?);

        Ok(Config {
            store_path,
            cred_resolvers_path,
            kubeconfig_paths,
            inventory_address,
            source_timeout,
            resync_interval,
        })
    }
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a number of seconds, got '{}'", key, raw))?;
    if secs == 0 {
        bail!("{} must be greater than zero", key);
    }
    Ok(secs)
}
