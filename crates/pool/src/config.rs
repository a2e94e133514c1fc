// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker pool configuration

use crate::{env, ConfigError};

pub const DEFAULT_MAX_WORKERS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Maximum number of concurrently running status workers
    pub max_workers: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

impl PoolConfig {
    pub fn new(max_workers: usize) -> Result<Self, ConfigError> {
        if max_workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(Self { max_workers })
    }

    /// Defaults overridden by `KSTATUS_MAX_WORKERS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::max_workers()? {
            Some(max_workers) => Self::new(max_workers),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
