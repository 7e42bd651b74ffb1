// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster record aggregation and status resolution.

pub mod merge;
pub mod status;

pub use merge::{merge, MergeOutcome, Merger, SourceBatch};
pub use status::{credential_axis, resolve_status};
