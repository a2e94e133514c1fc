//! Tasks that no longer describe the stored resource are dropped.

use crate::prelude::*;

#[tokio::test]
async fn generation_mismatch_never_reaches_writer() {
    let h = Harness::new(2);
    let target = h.seed("ingress", 1);
    h.store.set_generation(&target.key(), 2);

    h.controller("accepted")
        .enqueue(target, Condition::new("Accepted", "True"));
    h.settle().await;

    assert_eq!(h.store.get_count(), 1);
    assert_eq!(h.store.write_attempts(), 0);
}

#[tokio::test]
async fn removed_resource_is_skipped() {
    let h = Harness::new(2);
    let target = h.seed("ingress", 1);
    h.store.remove(&target.key());

    h.controller("accepted")
        .enqueue(target, Condition::new("Accepted", "True"));
    h.settle().await;

    assert_eq!(h.store.write_attempts(), 0);
}

#[tokio::test]
async fn written_status_records_fetched_generation() {
    let h = Harness::new(2);
    let target = h.seed("ingress", 7);

    h.controller("accepted")
        .enqueue(target.clone(), Condition::new("Accepted", "True"));
    h.settle().await;

    let stored = h.store.config(&target.key()).unwrap();
    assert_eq!(stored.status.map(|s| s.observed_generation), Some(7));
}
