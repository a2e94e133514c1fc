// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entry point tying controllers to a shared worker pool.

use crate::{Controller, PoolConfig, PoolError, StatusStore, WorkerPool};
use kstatus_core::{ControllerId, GenerationProvider, Resource};
use std::future::Future;
use std::sync::Arc;

/// Owns the worker pool that every status controller writes through.
pub struct StatusManager<P, U, St> {
    pool: WorkerPool<P, U, St>,
}

impl<P, U, St> StatusManager<P, U, St>
where
    P: GenerationProvider,
    P::Status: Clone,
    U: Send + 'static,
    St: StatusStore<P::Status>,
{
    pub fn new(store: St, config: PoolConfig) -> Result<Self, PoolError> {
        Ok(Self {
            pool: WorkerPool::new(store, config)?,
        })
    }

    /// Build a manager sized by `KSTATUS_MAX_WORKERS`, or the default.
    pub fn from_env(store: St) -> Result<Self, PoolError> {
        Self::new(store, PoolConfig::from_env()?)
    }

    /// Begin graceful shutdown once `shutdown` resolves.
    pub fn start<F>(&self, shutdown: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.pool.run(shutdown);
    }

    pub fn create_controller(
        &self,
        id: impl Into<ControllerId>,
        merge: impl Fn(P, U) -> P + Send + Sync + 'static,
    ) -> StatusController<P, U, St> {
        self.bind(Controller::new(id, merge))
    }

    pub fn create_mutating_controller(
        &self,
        id: impl Into<ControllerId>,
        apply: impl Fn(&mut P, U) + Send + Sync + 'static,
    ) -> StatusController<P, U, St> {
        self.bind(Controller::mutating(id, apply))
    }

    pub fn pool(&self) -> &WorkerPool<P, U, St> {
        &self.pool
    }

    fn bind(&self, controller: Controller<P, U>) -> StatusController<P, U, St> {
        StatusController {
            controller: Arc::new(controller),
            pool: self.pool.clone(),
        }
    }
}

/// A controller bound to the pool it enqueues into.
pub struct StatusController<P, U, St> {
    controller: Arc<Controller<P, U>>,
    pool: WorkerPool<P, U, St>,
}

impl<P, U, St> Clone for StatusController<P, U, St> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
            pool: self.pool.clone(),
        }
    }
}

impl<P, U, St> StatusController<P, U, St>
where
    P: GenerationProvider,
    P::Status: Clone,
    U: Send + 'static,
    St: StatusStore<P::Status>,
{
    pub fn id(&self) -> &ControllerId {
        self.controller.id()
    }

    pub fn enqueue(&self, target: Resource, update: U) {
        self.pool.push(target, &self.controller, update);
    }

    pub fn delete(&self, target: &Resource) {
        self.pool.delete(target);
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
