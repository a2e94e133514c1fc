//! Test helpers for behavioral specifications.
//!
//! Provides a small harness around a status manager backed by an in-memory
//! store.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::sync::{Arc, Once};
use std::time::Duration;

pub use kstatus_core::test_support::{gateway, gateway_config};
pub use kstatus_core::{Condition, Resource, ResourceStatus, StatusProvider};
pub use kstatus_pool::test_support::{wait_for_idle, wait_until, FakeStore};
pub use kstatus_pool::{PoolConfig, StatusController, StatusManager};

// Spec polling timeouts
pub const SPEC_WAIT_MAX_MS: u64 = 2000;

pub type Store = Arc<FakeStore<ResourceStatus>>;
pub type Manager = StatusManager<StatusProvider, Condition, Store>;
pub type Ctl = StatusController<StatusProvider, Condition, Store>;

static TRACING: Once = Once::new();

/// Install a fmt subscriber honouring `RUST_LOG` (once per test binary).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub struct Harness {
    pub store: Store,
    pub manager: Manager,
}

impl Harness {
    pub fn new(max_workers: usize) -> Self {
        Self::with_store(FakeStore::new(), max_workers)
    }

    pub fn with_store(store: FakeStore<ResourceStatus>, max_workers: usize) -> Self {
        init_tracing();
        let store = Arc::new(store);
        let manager =
            StatusManager::new(Arc::clone(&store), PoolConfig::new(max_workers).unwrap()).unwrap();
        Self { store, manager }
    }

    /// Store a gateway at `generation` with an empty status.
    pub fn seed(&self, name: &str, generation: i64) -> Resource {
        self.store.insert(gateway_config(
            "default",
            name,
            generation,
            Some(ResourceStatus::default()),
        ));
        gateway("default", name, &generation.to_string())
    }

    /// A controller that sets the condition it is given.
    pub fn controller(&self, id: &str) -> Ctl {
        self.manager
            .create_mutating_controller(id, |p: &mut StatusProvider, c: Condition| {
                p.status.set_condition(c);
            })
    }

    pub async fn settle(&self) {
        let settled = wait_for_idle(
            self.manager.pool(),
            Duration::from_millis(SPEC_WAIT_MAX_MS),
        )
        .await;
        assert!(settled, "status pool did not go idle");
    }
}
