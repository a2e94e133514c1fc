// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stored resource state as returned by the resource store.

use crate::{GroupVersionResource, Resource, ResourceKey};
use serde::{Deserialize, Serialize};

/// The latest stored version of a resource, including its current status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config<S> {
    pub gvr: GroupVersionResource,
    pub namespace: String,
    pub name: String,
    pub generation: i64,
    #[serde(default)]
    pub resource_version: String,
    #[serde(default)]
    pub status: Option<S>,
}

impl<S> Config<S> {
    pub fn key(&self) -> ResourceKey {
        ResourceKey {
            gvr: self.gvr.clone(),
            namespace: self.namespace.clone(),
            name: self.name.clone(),
        }
    }

    pub fn resource(&self) -> Resource {
        Resource::from_config(self)
    }

    /// Check whether a task recorded at `generation` still describes this config.
    pub fn matches_generation(&self, generation: &str) -> bool {
        self.generation.to_string() == generation
    }
}
