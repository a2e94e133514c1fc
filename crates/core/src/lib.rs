// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kstatus-core: data model for the status write-back pool

pub mod config;
pub mod generation;
pub mod id;
pub mod resource;
pub mod status;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::Config;
pub use generation::{
    GenerationProvider, MissingGeneration, ProviderError, StatusProvider, UnstructuredProvider,
};
pub use id::ControllerId;
pub use resource::{GroupVersionResource, Resource, ResourceKey};
pub use status::{Condition, ResourceStatus, ValidationMessage};
