// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock-guarded coalescing work queue.

use crate::{CacheEntry, Controller, TaskCache};
use kstatus_core::{Resource, ResourceKey};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

type PushHook = Box<dyn Fn() + Send + Sync>;

/// [`TaskCache`] behind a lock, with every operation atomic.
pub struct WorkQueue<P, U> {
    cache: Mutex<TaskCache<P, U>>,
    on_push: Option<PushHook>,
}

impl<P, U> Default for WorkQueue<P, U> {
    fn default() -> Self {
        Self {
            cache: Mutex::new(TaskCache::new()),
            on_push: None,
        }
    }
}

impl<P, U> WorkQueue<P, U> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue that calls `hook` after every push.
    ///
    /// The hook runs with the queue lock released.
    pub fn with_on_push(hook: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            cache: Mutex::new(TaskCache::new()),
            on_push: Some(Box::new(hook)),
        }
    }

    pub fn push(&self, target: Resource, controller: &Arc<Controller<P, U>>, update: U) {
        let created = self.cache.lock().push(target, controller, update);
        if !created {
            tracing::trace!(controller = %controller.id(), "coalesced into pending status task");
        }
        if let Some(hook) = &self.on_push {
            hook();
        }
    }

    /// First pending task not in `exclusion`, removed from the queue.
    ///
    /// `None` means nothing is eligible right now. It does not mean the
    /// queue is empty: every pending key may be excluded.
    pub fn pop(&self, exclusion: &HashSet<ResourceKey>) -> Option<CacheEntry<P, U>> {
        self.cache.lock().pop(exclusion)
    }

    pub fn delete(&self, target: &Resource) -> bool {
        self.cache.lock().delete(target)
    }

    /// Pending task count. A scheduling hint only.
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
