// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory store and helpers for pool tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{StatusStore, StoreError, WorkerPool};
use async_trait::async_trait;
use kstatus_core::{Config, GenerationProvider, Resource, ResourceKey};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// A write the pool delivered to [`FakeStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct WriteRecord<S> {
    pub key: ResourceKey,
    pub generation: i64,
    pub status: S,
}

struct FakeStoreState<S> {
    configs: HashMap<ResourceKey, Config<S>>,
    writes: Vec<WriteRecord<S>>,
    gets: usize,
    write_attempts: usize,
    fail_writes: bool,
    active: HashMap<ResourceKey, usize>,
    active_total: usize,
    max_active_per_key: usize,
    max_active_total: usize,
}

/// In-memory [`StatusStore`] recording writes and write concurrency.
///
/// Writes fail if the resource was removed or its generation changed while
/// the write was open.
pub struct FakeStore<S> {
    state: Mutex<FakeStoreState<S>>,
    write_delay: Option<Duration>,
}

impl<S> Default for FakeStore<S> {
    fn default() -> Self {
        Self {
            state: Mutex::new(FakeStoreState {
                configs: HashMap::new(),
                writes: Vec::new(),
                gets: 0,
                write_attempts: 0,
                fail_writes: false,
                active: HashMap::new(),
                active_total: 0,
                max_active_per_key: 0,
                max_active_total: 0,
            }),
            write_delay: None,
        }
    }
}

impl<S: Clone> FakeStore<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every write open for `delay` so overlapping writes are observable.
    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = Some(delay);
        self
    }

    pub fn insert(&self, config: Config<S>) {
        self.state.lock().configs.insert(config.key(), config);
    }

    pub fn remove(&self, key: &ResourceKey) {
        self.state.lock().configs.remove(key);
    }

    pub fn set_generation(&self, key: &ResourceKey, generation: i64) {
        if let Some(config) = self.state.lock().configs.get_mut(key) {
            config.generation = generation;
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }

    pub fn config(&self, key: &ResourceKey) -> Option<Config<S>> {
        self.state.lock().configs.get(key).cloned()
    }

    pub fn writes(&self) -> Vec<WriteRecord<S>> {
        self.state.lock().writes.clone()
    }

    pub fn writes_for(&self, key: &ResourceKey) -> Vec<WriteRecord<S>> {
        self.state
            .lock()
            .writes
            .iter()
            .filter(|w| &w.key == key)
            .cloned()
            .collect()
    }

    pub fn get_count(&self) -> usize {
        self.state.lock().gets
    }

    pub fn write_attempts(&self) -> usize {
        self.state.lock().write_attempts
    }

    /// Highest number of simultaneous writes seen for any single resource.
    pub fn max_concurrent_writes_per_key(&self) -> usize {
        self.state.lock().max_active_per_key
    }

    /// Highest number of simultaneous writes seen across all resources.
    pub fn max_concurrent_writes(&self) -> usize {
        self.state.lock().max_active_total
    }
}

#[async_trait]
impl<S> StatusStore<S> for FakeStore<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn get(&self, target: &Resource) -> Option<Config<S>> {
        let mut state = self.state.lock();
        state.gets += 1;
        state.configs.get(&target.key()).cloned()
    }

    async fn write(&self, config: Config<S>, status: S) -> Result<(), StoreError> {
        let key = config.key();
        {
            let mut state = self.state.lock();
            state.write_attempts += 1;
            let active = state.active.entry(key.clone()).or_insert(0);
            *active += 1;
            let active = *active;
            state.active_total += 1;
            state.max_active_per_key = state.max_active_per_key.max(active);
            state.max_active_total = state.max_active_total.max(state.active_total);
        }

        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock();
        if let Some(active) = state.active.get_mut(&key) {
            *active -= 1;
        }
        state.active_total -= 1;

        if state.fail_writes {
            return Err(StoreError::Backend("injected failure".to_string()));
        }
        let Some(stored) = state.configs.get_mut(&key) else {
            return Err(StoreError::NotFound(key));
        };
        if stored.generation != config.generation {
            return Err(StoreError::Conflict {
                key,
                message: format!(
                    "stored generation {} does not match {}",
                    stored.generation, config.generation
                ),
            });
        }
        stored.status = Some(status.clone());
        state.writes.push(WriteRecord {
            key,
            generation: config.generation,
            status,
        });
        Ok(())
    }
}

/// Wait until the pool has no queued, in-flight or running work.
///
/// Returns false if the pool is still busy after `timeout`.
pub async fn wait_for_idle<P, U, St>(pool: &WorkerPool<P, U, St>, timeout: Duration) -> bool
where
    P: GenerationProvider,
    P::Status: Clone,
    U: Send + 'static,
    St: StatusStore<P::Status>,
{
    tokio::time::timeout(timeout, async {
        while !pool.is_idle() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .is_ok()
}

/// Wait until `condition` holds, polling every millisecond.
pub async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    tokio::time::timeout(timeout, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .is_ok()
}
