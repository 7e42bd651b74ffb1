// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod credentials;
pub mod engine;
pub mod error;
pub mod sources;
pub mod store;
pub mod sync;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;
