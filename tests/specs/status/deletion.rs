//! Deleting a resource's pending work.

use crate::prelude::*;

#[tokio::test]
async fn delete_before_pop_means_no_write() {
    let h = Harness::new(2);
    let target = h.seed("ingress", 1);
    let accepted = h.controller("accepted");

    accepted.enqueue(target.clone(), Condition::new("Accepted", "True"));
    accepted.delete(&target);
    h.settle().await;

    assert_eq!(h.store.get_count(), 0);
    assert!(h.store.writes().is_empty());
}

#[tokio::test]
async fn enqueue_after_delete_is_written() {
    let h = Harness::new(2);
    let target = h.seed("ingress", 1);
    let accepted = h.controller("accepted");

    accepted.enqueue(target.clone(), Condition::new("Accepted", "False"));
    accepted.delete(&target);
    accepted.enqueue(target.clone(), Condition::new("Accepted", "True"));
    h.settle().await;

    let writes = h.store.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].status.condition("Accepted").unwrap().status, "True");
}
