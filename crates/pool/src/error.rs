// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the status pool

use kstatus_core::ResourceKey;
use thiserror::Error;

/// Errors constructing a worker pool
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("no tokio runtime available to spawn status workers")]
    NoRuntime,
    #[error("invalid pool config: {0}")]
    Config(#[from] ConfigError),
}

/// Errors in pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_workers must be at least 1")]
    ZeroWorkers,
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Errors reported by a [`crate::StatusStore`] write
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("resource not found: {0}")]
    NotFound(ResourceKey),
    #[error("conflict writing status for {key}: {message}")]
    Conflict { key: ResourceKey, message: String },
    #[error("store backend error: {0}")]
    Backend(String),
}
