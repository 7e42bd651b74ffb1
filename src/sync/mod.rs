// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Discovery pass orchestration.

pub mod manager;
pub mod pass;

pub use manager::{SyncEvent, SyncManager, SyncManagerHandle, SyncReport};
pub use pass::{ConfigPassProvider, PassProvider, SyncPass};
