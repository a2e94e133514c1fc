// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Seam between the pool and the resource store it writes through.

use crate::StoreError;
use async_trait::async_trait;
use kstatus_core::{Config, Resource};
use std::sync::Arc;

/// Read and write access to stored resources.
///
/// The pool never calls either method while holding a lock, and never calls
/// `write` concurrently for the same resource. Any other concurrency safety
/// is the implementation's concern.
#[async_trait]
pub trait StatusStore<S: Send + 'static>: Send + Sync + 'static {
    /// Latest stored state, or `None` if the resource no longer exists.
    async fn get(&self, target: &Resource) -> Option<Config<S>>;

    /// Persist a merged status. Failures are logged by the pool, not retried.
    async fn write(&self, config: Config<S>, status: S) -> Result<(), StoreError>;
}

#[async_trait]
impl<S, T> StatusStore<S> for Arc<T>
where
    S: Send + 'static,
    T: StatusStore<S> + ?Sized,
{
    async fn get(&self, target: &Resource) -> Option<Config<S>> {
        (**self).get(target).await
    }

    async fn write(&self, config: Config<S>, status: S) -> Result<(), StoreError> {
        (**self).write(config, status).await
    }
}
