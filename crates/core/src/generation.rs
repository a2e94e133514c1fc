// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observed-generation access over status payloads.
//!
//! The worker pool is generic over [`GenerationProvider`], so the merge
//! protocol never needs to know the concrete status schema. One provider
//! exists per supported schema.

use crate::ResourceStatus;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// JSON field carrying the observed generation in unstructured statuses.
pub const OBSERVED_GENERATION_FIELD: &str = "observedGeneration";

/// View over a status payload exposing its observed generation.
pub trait GenerationProvider: Sized + Send + 'static {
    /// The raw payload type stored on the resource.
    type Status: Send + Sync + 'static;

    /// Build a view over a raw status value.
    ///
    /// Fails when the payload has no observed-generation field. The error
    /// still carries a usable provider so callers can set the field anyway.
    fn from_status(status: Option<Self::Status>) -> Result<Self, ProviderError<Self>>;

    fn observed_generation(&self) -> i64;

    fn set_observed_generation(&mut self, generation: i64);

    /// Unwrap to the underlying payload.
    fn into_status(self) -> Self::Status;
}

/// Why a payload could not be viewed as carrying an observed generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissingGeneration {
    #[error("no status present")]
    NoStatus,
    #[error("status is not an object: {0}")]
    NotAnObject(&'static str),
    #[error("status has no observedGeneration field")]
    NoField,
}

/// Recoverable failure from [`GenerationProvider::from_status`].
pub struct ProviderError<P> {
    pub reason: MissingGeneration,
    fallback: P,
}

impl<P> ProviderError<P> {
    pub fn new(reason: MissingGeneration, fallback: P) -> Self {
        Self { reason, fallback }
    }

    /// The provider to use when overwriting the field.
    pub fn into_fallback(self) -> P {
        self.fallback
    }
}

impl<P> fmt::Debug for ProviderError<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderError")
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}

impl<P> fmt::Display for ProviderError<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl<P> std::error::Error for ProviderError<P> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

/// Provider over the typed [`ResourceStatus`] schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusProvider {
    pub status: ResourceStatus,
}

impl StatusProvider {
    pub fn new(status: ResourceStatus) -> Self {
        Self { status }
    }
}

impl GenerationProvider for StatusProvider {
    type Status = ResourceStatus;

    fn from_status(status: Option<ResourceStatus>) -> Result<Self, ProviderError<Self>> {
        match status {
            Some(status) => Ok(Self { status }),
            None => Err(ProviderError::new(
                MissingGeneration::NoStatus,
                Self::default(),
            )),
        }
    }

    fn observed_generation(&self) -> i64 {
        self.status.observed_generation
    }

    fn set_observed_generation(&mut self, generation: i64) {
        self.status.observed_generation = generation;
    }

    fn into_status(self) -> ResourceStatus {
        self.status
    }
}

/// Provider over an arbitrary JSON status object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnstructuredProvider {
    pub fields: Map<String, Value>,
}

impl UnstructuredProvider {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }
}

impl GenerationProvider for UnstructuredProvider {
    type Status = Value;

    fn from_status(status: Option<Value>) -> Result<Self, ProviderError<Self>> {
        let fields = match status {
            Some(Value::Object(fields)) => fields,
            Some(other) => {
                return Err(ProviderError::new(
                    MissingGeneration::NotAnObject(json_kind(&other)),
                    Self::default(),
                ))
            }
            None => {
                return Err(ProviderError::new(
                    MissingGeneration::NoStatus,
                    Self::default(),
                ))
            }
        };
        if fields.contains_key(OBSERVED_GENERATION_FIELD) {
            Ok(Self { fields })
        } else {
            Err(ProviderError::new(
                MissingGeneration::NoField,
                Self { fields },
            ))
        }
    }

    fn observed_generation(&self) -> i64 {
        match self.fields.get(OBSERVED_GENERATION_FIELD) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or_default(),
            Some(Value::String(s)) => s.parse().unwrap_or_default(),
            _ => 0,
        }
    }

    fn set_observed_generation(&mut self, generation: i64) {
        self.fields
            .insert(OBSERVED_GENERATION_FIELD.to_string(), Value::from(generation));
    }

    fn into_status(self) -> Value {
        Value::Object(self.fields)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "generation_tests.rs"]
mod tests;
