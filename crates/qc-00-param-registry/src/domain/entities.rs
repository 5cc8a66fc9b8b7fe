//! Core entities for the Parameter Registry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A typed parameter value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    U64(u64),
    F64(f64),
    Bool(bool),
    String(String),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::U64(_) => ParamKind::U64,
            ParamValue::F64(_) => ParamKind::F64,
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::String(_) => ParamKind::String,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ParamValue::U64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::F64(v) => Some(*v),
            _ => None,
        }
    }
}

/// The declared type of a parameter, used to validate `set` calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    U64,
    F64,
    Bool,
    String,
}

/// Numeric bounds enforced on `set`. `None` on either side means unbounded.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    fn contains(&self, value: f64) -> bool {
        if let Some(min) = self.min {
            if value < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return false;
            }
        }
        true
    }
}

/// A registered parameter's schema: its type and optional numeric bounds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParamSchema {
    pub kind: ParamKind,
    pub bounds: Bounds,
}

impl ParamSchema {
    pub fn new(kind: ParamKind) -> Self {
        Self {
            kind,
            bounds: Bounds::none(),
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Validates a candidate value against this schema's type and bounds.
    pub fn validate(&self, value: &ParamValue) -> Result<(), super::errors::RegistryError> {
        if value.kind() != self.kind {
            return Err(super::errors::RegistryError::InvalidValue {
                reason: format!("expected {:?}, got {:?}", self.kind, value.kind()),
            });
        }

        let numeric = match value {
            ParamValue::U64(v) => Some(*v as f64),
            ParamValue::F64(v) => Some(*v),
            _ => None,
        };

        if let Some(n) = numeric {
            if !self.bounds.contains(n) {
                return Err(super::errors::RegistryError::OutOfBounds {
                    value: n,
                    min: self.bounds.min,
                    max: self.bounds.max,
                });
            }
        }

        Ok(())
    }
}

/// An immutable, consistent snapshot of all registered parameters.
///
/// Readers hold an `Arc<Snapshot>` cloned from the registry; a writer never
/// mutates a snapshot in place, it builds a new one and publishes it atomically.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub values: HashMap<String, ParamValue>,
    pub schemas: HashMap<String, ParamSchema>,
}

impl Snapshot {
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }
}
