//! Default schema seeded at registry initialization.
//!
//! Values mirror the consensus constants the scaling subsystems depend on;
//! the registry is their single source of truth and the sole channel through
//! which Governance may change them at runtime.

use crate::domain::entities::{Bounds, ParamKind, ParamSchema, ParamValue};

/// (name, initial value, schema) triples installed by `ParameterRegistryService::new`.
pub fn defaults() -> Vec<(&'static str, ParamValue, ParamSchema)> {
    vec![
        (
            "blocksize.base",
            ParamValue::U64(1_000_000),
            ParamSchema::new(ParamKind::U64).with_bounds(Bounds::range(1.0, 100_000_000.0)),
        ),
        (
            "blocksize.max_increase_factor",
            ParamValue::F64(2.0),
            ParamSchema::new(ParamKind::F64).with_bounds(Bounds::range(1.0, 10.0)),
        ),
        (
            "blocksize.max_decrease_factor",
            ParamValue::F64(0.5),
            ParamSchema::new(ParamKind::F64).with_bounds(Bounds::range(0.01, 1.0)),
        ),
        (
            "blocksize.adjustment_period",
            ParamValue::U64(2016),
            ParamSchema::new(ParamKind::U64).with_bounds(Bounds::range(1.0, 1_000_000.0)),
        ),
        (
            "blocksize.hard_ceiling",
            ParamValue::U64(100_000_000),
            ParamSchema::new(ParamKind::U64).with_bounds(Bounds::range(1.0, f64::MAX)),
        ),
        (
            "ctor.period",
            ParamValue::U64(2016),
            ParamSchema::new(ParamKind::U64).with_bounds(Bounds::range(1.0, 1_000_000.0)),
        ),
        (
            "ctor.threshold_numerator",
            ParamValue::U64(1916),
            ParamSchema::new(ParamKind::U64).with_bounds(Bounds::range(1.0, 2016.0)),
        ),
        (
            "ctor.grace_period",
            ParamValue::U64(1008),
            ParamSchema::new(ParamKind::U64).with_bounds(Bounds::range(0.0, 1_000_000.0)),
        ),
        (
            "consensus.min_validator_stake",
            ParamValue::U64(100_000),
            ParamSchema::new(ParamKind::U64).with_bounds(Bounds::range(1.0, f64::MAX)),
        ),
        (
            "consensus.checkpoint_interval",
            ParamValue::U64(100),
            ParamSchema::new(ParamKind::U64).with_bounds(Bounds::range(1.0, 1_000_000.0)),
        ),
        (
            "consensus.slashing_penalty",
            ParamValue::F64(0.1),
            ParamSchema::new(ParamKind::F64).with_bounds(Bounds::range(0.0, 1.0)),
        ),
        (
            "governance.emergency_mode",
            ParamValue::Bool(false),
            ParamSchema::new(ParamKind::Bool),
        ),
        (
            "governance.protocol_version",
            ParamValue::U64(1),
            ParamSchema::new(ParamKind::U64).with_bounds(Bounds::range(1.0, f64::MAX)),
        ),
    ]
}
