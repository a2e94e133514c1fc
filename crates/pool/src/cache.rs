// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pending status tasks keyed by resource.
//!
//! [`TaskCache`] is a plain data structure; [`crate::WorkQueue`] supplies the
//! locking.

use crate::Controller;
use indexmap::IndexMap;
use kstatus_core::{ControllerId, Resource, ResourceKey};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

/// The latest update one controller has queued for a resource.
pub struct PendingUpdate<P, U> {
    pub controller: Arc<Controller<P, U>>,
    pub update: U,
}

impl<P, U: fmt::Debug> fmt::Debug for PendingUpdate<P, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingUpdate")
            .field("controller", self.controller.id())
            .field("update", &self.update)
            .finish()
    }
}

/// One pending task: the latest resource snapshot plus one update per controller.
///
/// Updates are kept in the order controllers first pushed into this task.
/// That order is an implementation detail, not a guarantee.
pub struct CacheEntry<P, U> {
    pub resource: Resource,
    pub updates: IndexMap<ControllerId, PendingUpdate<P, U>>,
}

impl<P, U> CacheEntry<P, U> {
    pub fn key(&self) -> ResourceKey {
        self.resource.key()
    }

    pub fn update_for(&self, controller: &str) -> Option<&U> {
        self.updates.get(controller).map(|p| &p.update)
    }
}

impl<P, U: fmt::Debug> fmt::Debug for CacheEntry<P, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("resource", &self.resource)
            .field("updates", &self.updates)
            .finish()
    }
}

/// FIFO sequence of pending resource keys plus their cache entries.
///
/// Every pending key has an entry, and no key is pending twice.
pub struct TaskCache<P, U> {
    pending: VecDeque<ResourceKey>,
    entries: HashMap<ResourceKey, CacheEntry<P, U>>,
}

impl<P, U> Default for TaskCache<P, U> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
            entries: HashMap::new(),
        }
    }
}

impl<P, U> TaskCache<P, U> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an update, coalescing into the pending task for the same key.
    ///
    /// Returns true when a new task was created.
    pub fn push(&mut self, resource: Resource, controller: &Arc<Controller<P, U>>, update: U) -> bool {
        let pending = PendingUpdate {
            controller: Arc::clone(controller),
            update,
        };
        let key = resource.key();
        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.resource = resource;
                entry.updates.insert(controller.id().clone(), pending);
                false
            }
            None => {
                let mut updates = IndexMap::new();
                updates.insert(controller.id().clone(), pending);
                self.entries
                    .insert(key.clone(), CacheEntry { resource, updates });
                self.pending.push_back(key);
                true
            }
        }
    }

    /// Remove and return the first pending task whose key is not excluded.
    pub fn pop(&mut self, exclusion: &HashSet<ResourceKey>) -> Option<CacheEntry<P, U>> {
        let mut i = 0;
        while i < self.pending.len() {
            let key = &self.pending[i];
            if !self.entries.contains_key(key) {
                self.pending.remove(i);
                continue;
            }
            if exclusion.contains(key) {
                i += 1;
                continue;
            }
            let key = self.pending.remove(i)?;
            return self.entries.remove(&key);
        }
        None
    }

    /// Drop any pending task for the resource. Returns true if one existed.
    pub fn delete(&mut self, resource: &Resource) -> bool {
        let key = resource.key();
        let existed = self.entries.remove(&key).is_some();
        if existed {
            self.pending.retain(|k| *k != key);
        }
        existed
    }

    pub fn get(&self, key: &ResourceKey) -> Option<&CacheEntry<P, U>> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
