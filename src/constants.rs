// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variables read by `Config::from_env`
pub mod env {
    pub const STORE_PATH: &str = "KUBEDEX_STORE_PATH";
    pub const CRED_RESOLVERS_PATH: &str = "KUBEDEX_CRED_RESOLVERS_PATH";
    pub const INVENTORY_ADDRESS: &str = "KUBEDEX_INVENTORY_ADDRESS";
    pub const SOURCE_TIMEOUT_SECS: &str = "KUBEDEX_SOURCE_TIMEOUT_SECS";
    pub const RESYNC_INTERVAL_SECS: &str = "KUBEDEX_RESYNC_INTERVAL_SECS";
    /// Standard kubectl variable, a path list
    pub const KUBECONFIG: &str = "KUBECONFIG";
}

/// Default on-disk locations, relative to the user's home directory
pub mod paths {
    pub const DATA_DIR: &str = ".kubedex";
    pub const STORE_FILE: &str = "clusters.json";
    pub const CRED_RESOLVERS_FILE: &str = "cred_resolvers.json";
    pub const KUBECONFIG: &str = ".kube/config";
}

/// Sync timing defaults
pub mod sync {
    /// Upper bound for a single discovery source call
    pub const SOURCE_TIMEOUT_SECS: u64 = 30;
    /// Cadence of the background resync loop
    pub const RESYNC_INTERVAL_SECS: u64 = 300;
    /// Capacity of the SyncManager event channel
    pub const EVENT_CHANNEL_CAPACITY: usize = 64;
}

/// Inventory service endpoint listing clusters
pub const INVENTORY_CLUSTERS_PATH: &str = "api/v1/clusters";
