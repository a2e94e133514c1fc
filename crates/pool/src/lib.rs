// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kstatus-pool: status write-back worker pool
//!
//! Callers push `(resource, controller, update)` triples. Pending updates for
//! the same resource coalesce into one task, and a bounded set of tokio
//! workers writes each task back through a [`StatusStore`], never running two
//! writes for the same resource at once.

mod cache;
mod config;
mod controller;
pub mod env;
mod error;
mod manager;
mod pool;
mod queue;
mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use cache::{CacheEntry, PendingUpdate, TaskCache};
pub use config::{PoolConfig, DEFAULT_MAX_WORKERS};
pub use controller::Controller;
pub use error::{ConfigError, PoolError, StoreError};
pub use manager::{StatusController, StatusManager};
pub use pool::WorkerPool;
pub use queue::WorkQueue;
pub use store::StatusStore;
