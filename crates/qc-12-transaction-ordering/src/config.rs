//! Configuration for Canonical Transaction Ordering.

use serde::{Deserialize, Serialize};

/// CTOR deployment parameters, modeled on a BIP9-style versionbits
/// signaling window.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CtorConfig {
    /// Rolling window size, in blocks, over which signaling is tallied.
    pub period: u64,
    /// Numerator of the activation threshold (e.g. 1916).
    pub threshold_numerator: u64,
    /// Denominator of the activation threshold (e.g. 2016).
    pub threshold_denominator: u64,
    /// Blocks after activation during which both canonical and legacy
    /// ordering are accepted.
    pub grace_period: u64,
    /// Number of full signaling windows `Started` may run through without
    /// reaching `LockedIn` before giving up and moving to `Failed`.
    pub timeout_periods: u64,
}

impl Default for CtorConfig {
    fn default() -> Self {
        Self {
            period: 2016,
            threshold_numerator: 1916,
            threshold_denominator: 2016,
            grace_period: 1008,
            timeout_periods: 26,
        }
    }
}

impl CtorConfig {
    pub fn for_testing() -> Self {
        Self {
            period: 10,
            threshold_numerator: 8,
            threshold_denominator: 10,
            grace_period: 5,
            timeout_periods: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CtorConfig::default();
        assert_eq!(config.period, 2016);
        assert_eq!(config.threshold_numerator, 1916);
        assert_eq!(config.threshold_denominator, 2016);
        assert_eq!(config.grace_period, 1008);
        assert_eq!(config.timeout_periods, 26);
    }
}
