// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the status pool.

use crate::ConfigError;

/// Upper bound on concurrent status workers.
pub const MAX_WORKERS_VAR: &str = "KSTATUS_MAX_WORKERS";

/// Worker count override. `Ok(None)` when unset.
pub fn max_workers() -> Result<Option<usize>, ConfigError> {
    let Ok(raw) = std::env::var(MAX_WORKERS_VAR) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<usize>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnv {
            var: MAX_WORKERS_VAR,
            value: raw,
        })
}
