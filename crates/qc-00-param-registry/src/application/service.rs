//! Parameter Registry service.
//!
//! Readers clone the `Arc<Snapshot>` behind the `RwLock` without blocking
//! writers for long; writers hold the lock only while building and
//! publishing the next snapshot, so a multi-key batch still commits as a
//! single atomic swap.

use crate::config::defaults;
use crate::domain::entities::{ParamSchema, ParamValue, Snapshot};
use crate::domain::errors::RegistryError;
use crate::ports::inbound::ParameterRegistryApi;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

pub struct ParameterRegistryService {
    snapshot: RwLock<Arc<Snapshot>>,
}

impl ParameterRegistryService {
    /// Builds a registry pre-populated with the scaling/consensus defaults.
    pub fn new() -> Self {
        let mut snapshot = Snapshot::default();
        for (name, value, schema) in defaults() {
            snapshot.values.insert(name.to_string(), value);
            snapshot.schemas.insert(name.to_string(), schema);
        }
        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Builds an empty registry with no default parameters (test use).
    pub fn empty() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
        }
    }

    /// A cheap clone of the current snapshot `Arc`, for readers that need a
    /// consistent multi-key view rather than individual `get` calls.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().clone()
    }

    /// Applies a batch of validated changes as a single atomic swap, used by
    /// governance execution so block validation never observes a half-applied
    /// multi-key parameter change.
    pub fn apply_batch(&self, changes: Vec<(String, ParamValue)>) -> Result<(), RegistryError> {
        let mut guard = self.snapshot.write();
        let mut next = (**guard).clone();

        for (name, value) in &changes {
            let schema = next
                .schemas
                .get(name)
                .ok_or_else(|| RegistryError::UnknownParameter { name: name.clone() })?;
            schema.validate(value)?;
        }

        for (name, value) in changes {
            next.values.insert(name, value);
        }

        *guard = Arc::new(next);
        Ok(())
    }
}

impl Default for ParameterRegistryService {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterRegistryApi for ParameterRegistryService {
    fn get(&self, name: &str) -> Result<ParamValue, RegistryError> {
        self.snapshot
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownParameter {
                name: name.to_string(),
            })
    }

    fn set(&self, name: &str, value: ParamValue) -> Result<(), RegistryError> {
        let mut guard = self.snapshot.write();
        let schema = guard
            .schemas
            .get(name)
            .ok_or_else(|| RegistryError::UnknownParameter {
                name: name.to_string(),
            })?
            .clone();
        schema.validate(&value)?;

        let mut next = (**guard).clone();
        info!(parameter = name, ?value, "parameter updated");
        next.values.insert(name.to_string(), value);
        *guard = Arc::new(next);
        Ok(())
    }

    fn register_schema(
        &self,
        name: &str,
        schema: ParamSchema,
        initial: ParamValue,
    ) -> Result<(), RegistryError> {
        let mut guard = self.snapshot.write();
        if guard.schemas.contains_key(name) {
            return Err(RegistryError::Duplicate {
                name: name.to_string(),
            });
        }
        schema.validate(&initial)?;

        let mut next = (**guard).clone();
        next.schemas.insert(name.to_string(), schema);
        next.values.insert(name.to_string(), initial);
        *guard = Arc::new(next);
        Ok(())
    }
}
