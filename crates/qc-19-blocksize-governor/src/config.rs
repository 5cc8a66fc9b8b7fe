//! Configuration for the Block-Size Governor.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernorConfig {
    /// Starting and floor block-size limit, in bytes.
    pub base_size: u64,
    /// Maximum per-adjustment growth multiplier.
    pub max_increase_factor: f64,
    /// Maximum per-adjustment shrink multiplier.
    pub max_decrease_factor: f64,
    /// Blocks between periodic adjustments.
    pub adjustment_period: u64,
    /// Minimum samples required before the emergency predicate is evaluated.
    pub min_sample_size: usize,
    /// Fraction of `min_sample_size` blocks that must sit at/above
    /// `emergency_utilization` of the current limit to trip emergency mode.
    pub emergency_threshold: f64,
    /// Utilization fraction of current_limit that counts as "at capacity".
    pub emergency_utilization: f64,
    /// Multiplier applied to current_limit when emergency mode trips.
    pub emergency_multiplier: f64,
    /// Hard network ceiling, in bytes, unless consensus explicitly lifts it.
    pub hard_ceiling: u64,
    /// Height at which governance becomes active.
    pub activation_height: u64,
    /// Miner votes only move consensus size when |f - 1| exceeds this.
    pub vote_influence_threshold: f64,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            base_size: 1_000_000,
            max_increase_factor: 2.0,
            max_decrease_factor: 0.5,
            adjustment_period: 2016,
            min_sample_size: 100,
            emergency_threshold: 0.95,
            emergency_utilization: 0.95,
            emergency_multiplier: 4.0,
            hard_ceiling: 100_000_000,
            activation_height: 2000,
            vote_influence_threshold: 0.5,
        }
    }
}

impl GovernorConfig {
    /// A config with small windows, convenient for exercising adjustment
    /// and emergency-mode transitions without huge fixtures.
    pub fn for_testing() -> Self {
        Self {
            base_size: 1_000,
            adjustment_period: 10,
            min_sample_size: 5,
            activation_height: 0,
            ..Self::default()
        }
    }
}
