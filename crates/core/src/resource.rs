// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource references and their canonical lock keys.

use crate::Config;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Descriptor of a resource type in the control plane.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupVersionResource {
    pub group: String,
    pub version: String,
    pub resource: String,
}

impl GroupVersionResource {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            resource: resource.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.group.is_empty() && self.version.is_empty() && self.resource.is_empty()
    }
}

impl fmt::Display for GroupVersionResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}/{}", self.version, self.resource)
        } else {
            write!(f, "{}/{}/{}", self.group, self.version, self.resource)
        }
    }
}

/// A reference to one versioned resource whose status is being written.
///
/// `generation` is the decimal string form of the resource's generation at
/// the time the update was computed. The default value is the "not found"
/// sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    pub gvr: GroupVersionResource,
    pub namespace: String,
    pub name: String,
    pub generation: String,
}

impl Resource {
    pub fn new(
        gvr: GroupVersionResource,
        namespace: impl Into<String>,
        name: impl Into<String>,
        generation: impl Into<String>,
    ) -> Self {
        Self {
            gvr,
            namespace: namespace.into(),
            name: name.into(),
            generation: generation.into(),
        }
    }

    /// Build the reference for a stored config at its current generation.
    pub fn from_config<S>(config: &Config<S>) -> Self {
        Self {
            gvr: config.gvr.clone(),
            namespace: config.namespace.clone(),
            name: config.name.clone(),
            generation: config.generation.to_string(),
        }
    }

    /// Canonical identity, ignoring generation.
    pub fn key(&self) -> ResourceKey {
        ResourceKey {
            gvr: self.gvr.clone(),
            namespace: self.namespace.clone(),
            name: self.name.clone(),
        }
    }

    /// Return a copy of this reference at another generation.
    pub fn at_generation(&self, generation: impl Into<String>) -> Self {
        Self {
            generation: generation.into(),
            ..self.clone()
        }
    }

    /// True for the zero-value sentinel.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.key(), self.generation)
    }
}

/// Identity of a resource with the generation dropped.
///
/// Two pushes for the same resource at different generations map to the same
/// key and therefore coalesce into one task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceKey {
    pub gvr: GroupVersionResource,
    pub namespace: String,
    pub name: String,
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{} {}", self.gvr, self.name)
        } else {
            write!(f, "{} {}/{}", self.gvr, self.namespace, self.name)
        }
    }
}

impl From<&Resource> for ResourceKey {
    fn from(resource: &Resource) -> Self {
        resource.key()
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
