// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status submitters and their merge functions.

use kstatus_core::ControllerId;
use std::fmt;

type MergeFn<P, U> = dyn Fn(P, U) -> P + Send + Sync;

/// One logical writer contributing to resource statuses.
///
/// The merge function folds an update into the current status view. The pool
/// only stores references to controllers; callers own them.
pub struct Controller<P, U> {
    id: ControllerId,
    merge: Box<MergeFn<P, U>>,
}

impl<P: 'static, U: 'static> Controller<P, U> {
    pub fn new(
        id: impl Into<ControllerId>,
        merge: impl Fn(P, U) -> P + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            merge: Box::new(merge),
        }
    }

    /// Build a controller from a function that edits the status in place.
    pub fn mutating(
        id: impl Into<ControllerId>,
        apply: impl Fn(&mut P, U) + Send + Sync + 'static,
    ) -> Self {
        Self::new(id, move |mut provider, update| {
            apply(&mut provider, update);
            provider
        })
    }
}

impl<P, U> Controller<P, U> {
    pub fn id(&self) -> &ControllerId {
        &self.id
    }

    pub fn merge(&self, provider: P, update: U) -> P {
        (self.merge)(provider, update)
    }
}

impl<P, U> fmt::Debug for Controller<P, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
