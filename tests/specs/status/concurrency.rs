//! Worker bounds and per-resource write serialization under load.

use crate::prelude::*;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn burst_respects_worker_bound() {
    let h = Harness::with_store(
        FakeStore::new().with_write_delay(Duration::from_millis(10)),
        4,
    );
    let accepted = h.controller("accepted");
    let targets: Vec<Resource> = (0..32).map(|i| h.seed(&format!("gw-{i}"), 1)).collect();

    for target in &targets {
        accepted.enqueue(target.clone(), Condition::new("Accepted", "True"));
        assert!(h.manager.pool().worker_count() <= 4);
    }
    h.settle().await;

    assert_eq!(h.store.writes().len(), 32);
    assert!(h.store.max_concurrent_writes() <= 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn contended_resources_are_serialized() {
    let h = Harness::with_store(
        FakeStore::new().with_write_delay(Duration::from_millis(3)),
        8,
    );
    let hot: Vec<Resource> = (0..3).map(|i| h.seed(&format!("hot-{i}"), 1)).collect();
    let controllers: Vec<Ctl> = ["a", "b", "c"].iter().map(|id| h.controller(id)).collect();

    let mut tasks = Vec::new();
    for ctl in controllers {
        let hot = hot.clone();
        tasks.push(tokio::spawn(async move {
            for round in 0..20 {
                for target in &hot {
                    ctl.enqueue(
                        target.clone(),
                        Condition::new(ctl.id().as_str(), "True").with_reason("Round", round.to_string()),
                    );
                }
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }
    h.settle().await;

    assert_eq!(h.store.max_concurrent_writes_per_key(), 1);
    for target in &hot {
        let stored = h.store.config(&target.key()).unwrap().status.unwrap();
        for id in ["a", "b", "c"] {
            assert_eq!(stored.condition(id).unwrap().message, "19", "{id} on {}", target.name);
        }
    }
}

#[tokio::test]
async fn shutdown_drains_without_starting_new_tasks() {
    let h = Harness::new(2);
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    h.manager.start(async move {
        let _ = rx.await;
    });
    let _ = tx.send(());
    assert!(
        wait_until(Duration::from_millis(SPEC_WAIT_MAX_MS), || h
            .manager
            .pool()
            .is_closing())
        .await
    );

    let target = h.seed("ingress", 1);
    h.controller("accepted")
        .enqueue(target, Condition::new("Accepted", "True"));
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(h.manager.pool().worker_count(), 0);
    assert_eq!(h.store.get_count(), 0);
}
