// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Config, GroupVersionResource, Resource};

pub fn gateway_gvr() -> GroupVersionResource {
    GroupVersionResource::new("networking.istio.io", "v1", "gateways")
}

pub fn gateway(namespace: &str, name: &str, generation: &str) -> Resource {
    Resource::new(gateway_gvr(), namespace, name, generation)
}

pub fn gateway_config<S>(
    namespace: &str,
    name: &str,
    generation: i64,
    status: Option<S>,
) -> Config<S> {
    Config {
        gvr: gateway_gvr(),
        namespace: namespace.to_string(),
        name: name.to_string(),
        generation,
        resource_version: format!("rv-{generation}"),
        status,
    }
}
