// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::Condition;
use serde_json::json;

#[test]
fn typed_provider_sets_generation_and_keeps_conditions() {
    let mut status = ResourceStatus::default();
    status.set_condition(Condition::new("Accepted", "True"));

    let mut provider = StatusProvider::from_status(Some(status)).unwrap();
    provider.set_observed_generation(5);
    assert_eq!(provider.observed_generation(), 5);

    let status = provider.into_status();
    assert_eq!(status.observed_generation, 5);
    assert!(status.condition("Accepted").is_some());
}

#[test]
fn typed_provider_without_status_falls_back_to_default() {
    let err = StatusProvider::from_status(None).unwrap_err();
    assert_eq!(err.reason, MissingGeneration::NoStatus);

    let mut provider = err.into_fallback();
    provider.set_observed_generation(2);
    assert_eq!(provider.into_status().observed_generation, 2);
}

#[test]
fn unstructured_provider_reads_numeric_generation() {
    let provider =
        UnstructuredProvider::from_status(Some(json!({ "observedGeneration": 4 }))).unwrap();
    assert_eq!(provider.observed_generation(), 4);
}

#[test]
fn unstructured_object_without_field_keeps_other_fields() {
    let err = UnstructuredProvider::from_status(Some(json!({ "phase": "Ready" }))).unwrap_err();
    assert_eq!(err.reason, MissingGeneration::NoField);

    let mut provider = err.into_fallback();
    provider.set_observed_generation(9);
    assert_eq!(
        provider.into_status(),
        json!({ "phase": "Ready", "observedGeneration": 9 })
    );
}

#[yare::parameterized(
    null   = { Some(json!(null)),   "status is not an object: null" },
    string = { Some(json!("ok")),   "status is not an object: string" },
    array  = { Some(json!([1, 2])), "status is not an object: array" },
    absent = { None,                "no status present" },
)]
fn unstructured_rejects_non_objects(status: Option<Value>, message: &str) {
    let err = UnstructuredProvider::from_status(status).unwrap_err();
    assert_eq!(err.to_string(), message);

    let mut provider = err.into_fallback();
    provider.set_observed_generation(1);
    assert_eq!(provider.into_status(), json!({ "observedGeneration": 1 }));
}

#[test]
fn provider_error_exposes_reason_as_source() {
    use std::error::Error;

    let err = StatusProvider::from_status(None).unwrap_err();
    let source = err.source().map(|s| s.to_string());
    assert_eq!(source.as_deref(), Some("no status present"));
}
