// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Self-scaling status worker pool.
//!
//! Workers are tokio tasks spawned lazily on push, up to `max_workers`. Each
//! worker pops a task whose resource is not already in flight, re-reads the
//! resource, folds every pending controller update into its status and
//! writes the result. A worker exits as soon as it finds the queue empty, so
//! an idle pool holds no tasks.
//!
//! Lock order is pool state, then queue. The queue lock is never held while
//! the pool lock is taken, and neither is held across a store call.

use crate::{CacheEntry, Controller, PoolConfig, PoolError, StatusStore, WorkQueue};
use kstatus_core::{GenerationProvider, Resource, ResourceKey};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tracing::{debug, info, trace, warn};

/// Scheduling bookkeeping, guarded by one lock.
#[derive(Debug, Default)]
struct PoolState {
    closing: bool,
    workers: usize,
    in_flight: HashSet<ResourceKey>,
}

struct Inner<P, U, St> {
    queue: WorkQueue<P, U>,
    state: Mutex<PoolState>,
    /// Signalled whenever a task completes, is pushed or deleted, or the pool closes.
    changed: Notify,
    store: St,
    runtime: Handle,
    max_workers: usize,
}

/// Worker pool executing at most one status write per resource at a time.
///
/// Cloning yields another handle to the same pool.
pub struct WorkerPool<P, U, St> {
    inner: Arc<Inner<P, U, St>>,
}

impl<P, U, St> Clone for WorkerPool<P, U, St> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P, U, St> WorkerPool<P, U, St>
where
    P: GenerationProvider,
    P::Status: Clone,
    U: Send + 'static,
    St: StatusStore<P::Status>,
{
    /// Create a pool spawning workers on the current tokio runtime.
    pub fn new(store: St, config: PoolConfig) -> Result<Self, PoolError> {
        let runtime = Handle::try_current().map_err(|_| PoolError::NoRuntime)?;
        Ok(Self::with_handle(store, config, runtime))
    }

    pub fn with_handle(store: St, config: PoolConfig, runtime: Handle) -> Self {
        let inner = Arc::new_cyclic(|weak: &Weak<Inner<P, U, St>>| {
            let weak = weak.clone();
            Inner {
                queue: WorkQueue::with_on_push(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.maybe_add_worker();
                    }
                }),
                state: Mutex::new(PoolState::default()),
                changed: Notify::new(),
                store,
                runtime,
                max_workers: config.max_workers.max(1),
            }
        });
        Self { inner }
    }

    /// Queue a status update. Never blocks on a write and never fails.
    pub fn push(&self, target: Resource, controller: &Arc<Controller<P, U>>, update: U) {
        self.inner.queue.push(target, controller, update);
    }

    /// Drop pending work for a resource.
    ///
    /// A write already in flight for the resource still completes.
    pub fn delete(&self, target: &Resource) {
        if self.inner.queue.delete(target) {
            debug!(resource = %target.key(), "deleted pending status task");
        }
        self.inner.wake_waiters();
    }

    /// Start watching `shutdown`. Returns immediately.
    ///
    /// Once `shutdown` resolves, the pool stops starting new tasks. Writes in
    /// progress run to completion and workers then exit.
    pub fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let weak = Arc::downgrade(&self.inner);
        self.inner.runtime.spawn(async move {
            shutdown.await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let workers = {
                let mut state = inner.state.lock();
                state.closing = true;
                state.workers
            };
            info!(workers, "status worker pool closing");
            inner.changed.notify_waiters();
        });
    }

    pub fn worker_count(&self) -> usize {
        self.inner.state.lock().workers
    }

    pub fn max_workers(&self) -> usize {
        self.inner.max_workers
    }

    /// Pending tasks not yet picked up by a worker.
    pub fn pending(&self) -> usize {
        self.inner.queue.len()
    }

    /// Resources currently being written.
    pub fn in_flight(&self) -> usize {
        self.inner.state.lock().in_flight.len()
    }

    pub fn is_closing(&self) -> bool {
        self.inner.state.lock().closing
    }

    /// True when nothing is queued, nothing is in flight and no worker runs.
    pub fn is_idle(&self) -> bool {
        let state = self.inner.state.lock();
        state.workers == 0 && state.in_flight.is_empty() && self.inner.queue.is_empty()
    }
}

impl<P, U, St> Inner<P, U, St>
where
    P: GenerationProvider,
    P::Status: Clone,
    U: Send + 'static,
    St: StatusStore<P::Status>,
{
    fn maybe_add_worker(self: &Arc<Self>) {
        let spawn = {
            let mut state = self.state.lock();
            if state.closing || state.workers >= self.max_workers || self.queue.is_empty() {
                false
            } else {
                state.workers += 1;
                trace!(workers = state.workers, "adding status worker");
                true
            }
        };
        if spawn {
            self.runtime.spawn(Arc::clone(self).work());
        }
        // Idle workers may be waiting on an all-in-flight queue
        self.wake_waiters();
    }

    /// Notify workers parked on the change signal.
    ///
    /// Takes the pool lock first, so a worker that checked the queue just
    /// before this call has already registered as a waiter.
    fn wake_waiters(&self) {
        drop(self.state.lock());
        self.changed.notify_waiters();
    }

    async fn work(self: Arc<Self>) {
        let mut slot = WorkerSlot {
            inner: Arc::clone(&self),
            released: false,
        };
        loop {
            let changed = self.changed.notified();
            tokio::pin!(changed);

            let next = {
                let mut state = self.state.lock();
                if state.closing || self.queue.is_empty() {
                    slot.release(&mut state);
                    trace!(workers = state.workers, "status worker exiting");
                    return;
                }
                match self.queue.pop(&state.in_flight) {
                    Some(entry) => {
                        state.in_flight.insert(entry.key());
                        Some(entry)
                    }
                    None => {
                        // Every pending key is in flight; register before unlocking
                        changed.as_mut().enable();
                        None
                    }
                }
            };

            let Some(entry) = next else {
                changed.await;
                continue;
            };

            let mut in_flight = InFlight {
                inner: &*self,
                key: entry.key(),
                finished: false,
            };
            self.execute(entry).await;
            in_flight.finished = true;
        }
    }

    async fn execute(&self, entry: CacheEntry<P, U>) {
        let CacheEntry { resource, updates } = entry;
        let key = resource.key();

        let Some(config) = self.store.get(&resource).await else {
            debug!(resource = %key, "resource no longer exists, dropping status update");
            return;
        };

        if !config.matches_generation(&resource.generation) {
            debug!(
                resource = %key,
                task_generation = %resource.generation,
                current_generation = config.generation,
                "resource generation moved on, dropping stale status update",
            );
            return;
        }

        let mut provider = match P::from_status(config.status.clone()) {
            Ok(provider) => provider,
            Err(err) => {
                warn!(resource = %key, error = %err, "status has no observed generation, overwriting");
                err.into_fallback()
            }
        };
        provider.set_observed_generation(config.generation);

        for (id, pending) in updates {
            trace!(resource = %key, controller = %id, "applying status update");
            provider = pending.controller.merge(provider, pending.update);
        }

        let generation = config.generation;
        if let Err(err) = self.store.write(config, provider.into_status()).await {
            warn!(resource = %key, generation, error = %err, "failed to write status");
        } else {
            debug!(resource = %key, generation, "wrote status");
        }
    }
}

/// A worker's claim on one of the `max_workers` slots.
///
/// Released under the pool lock on a normal exit. If the worker unwinds
/// instead, the slot is returned on drop and a replacement is provisioned
/// for any work still queued.
struct WorkerSlot<P, U, St>
where
    P: GenerationProvider,
    P::Status: Clone,
    U: Send + 'static,
    St: StatusStore<P::Status>,
{
    inner: Arc<Inner<P, U, St>>,
    released: bool,
}

impl<P, U, St> WorkerSlot<P, U, St>
where
    P: GenerationProvider,
    P::Status: Clone,
    U: Send + 'static,
    St: StatusStore<P::Status>,
{
    fn release(&mut self, state: &mut PoolState) {
        state.workers = state.workers.saturating_sub(1);
        self.released = true;
    }
}

impl<P, U, St> Drop for WorkerSlot<P, U, St>
where
    P: GenerationProvider,
    P::Status: Clone,
    U: Send + 'static,
    St: StatusStore<P::Status>,
{
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let workers = {
            let mut state = self.inner.state.lock();
            state.workers = state.workers.saturating_sub(1);
            state.workers
        };
        warn!(workers, "status worker stopped unexpectedly");
        self.inner.maybe_add_worker();
    }
}

/// Marks a resource as being written; clears the mark on drop.
struct InFlight<'a, P, U, St> {
    inner: &'a Inner<P, U, St>,
    key: ResourceKey,
    finished: bool,
}

impl<P, U, St> Drop for InFlight<'_, P, U, St> {
    fn drop(&mut self) {
        self.inner.state.lock().in_flight.remove(&self.key);
        if !self.finished {
            warn!(resource = %self.key, "status task aborted, releasing resource");
        }
        self.inner.changed.notify_waiters();
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
