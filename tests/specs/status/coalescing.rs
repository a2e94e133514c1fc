//! Pending updates for one resource collapse into a single write.

use crate::prelude::*;

#[tokio::test]
async fn repeated_updates_write_latest_value_once() {
    let h = Harness::new(4);
    let target = h.seed("ingress", 1);
    let accepted = h.controller("accepted");

    for reason in ["Pending", "Pending", "Accepted"] {
        accepted.enqueue(
            target.clone(),
            Condition::new("Accepted", "True").with_reason(reason, ""),
        );
    }
    h.settle().await;

    let writes = h.store.writes();
    assert_eq!(writes.len(), 1);
    let condition = writes[0].status.condition("Accepted").unwrap();
    assert_eq!(condition.reason, "Accepted");
}

#[tokio::test]
async fn two_submitters_one_task_both_merged() {
    let h = Harness::new(4);
    let target = h.seed("ingress", 1);
    let a = h.controller("a");
    let b = h.controller("b");

    a.enqueue(target.clone(), Condition::new("U1", "True"));
    b.enqueue(target.clone(), Condition::new("U2", "True"));
    assert_eq!(h.manager.pool().pending(), 1);
    h.settle().await;

    let writes = h.store.writes();
    assert_eq!(writes.len(), 1);

    let mut expected = ResourceStatus {
        observed_generation: 1,
        ..ResourceStatus::default()
    };
    let mut types: Vec<&str> = writes[0]
        .status
        .conditions
        .iter()
        .map(|c| c.type_.as_str())
        .collect();
    types.sort_unstable();
    assert_eq!(types, ["U1", "U2"]);

    // Merge order across submitters is unspecified; compare order-independently
    let mut actual = writes[0].status.clone();
    actual.conditions.sort_by(|x, y| x.type_.cmp(&y.type_));
    expected.conditions = vec![Condition::new("U1", "True"), Condition::new("U2", "True")];
    similar_asserts::assert_eq!(actual, expected);
}

#[tokio::test]
async fn pushes_at_newer_generation_coalesce_with_older() {
    let h = Harness::new(4);
    let older = h.seed("ingress", 1);
    let newer = h.seed("ingress", 2);
    let accepted = h.controller("accepted");

    accepted.enqueue(older, Condition::new("Accepted", "False"));
    accepted.enqueue(newer, Condition::new("Accepted", "True"));
    assert_eq!(h.manager.pool().pending(), 1);
    h.settle().await;

    let writes = h.store.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].status.observed_generation, 2);
    assert_eq!(writes[0].status.condition("Accepted").unwrap().status, "True");
}
