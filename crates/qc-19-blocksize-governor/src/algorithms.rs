//! Pure adjustment-formula and emergency-predicate functions.
//!
//! Kept free of locking/state concerns so they can be unit tested against
//! exact boundary values independent of the stateful service.

use crate::config::GovernorConfig;
use crate::domain::entities::{BlockSizeStats, MinerVote};

/// Derives the per-period adjustment factor from average utilization,
/// clamped to `[max_decrease_factor, max_increase_factor]`.
pub fn adjustment_factor(utilization: f64, config: &GovernorConfig) -> f64 {
    let raw = if utilization > 0.8 {
        1.0 + (utilization - 0.8) * 2.0
    } else if utilization < 0.3 {
        0.5 + utilization * 1.67
    } else {
        1.0
    };

    raw.clamp(config.max_decrease_factor, config.max_increase_factor)
}

/// `true` if at least `emergency_threshold` fraction of the last
/// `min_sample_size` blocks sat at or above `emergency_utilization` of
/// `current_limit`.
pub fn should_activate_emergency(
    recent_sizes: &[u64],
    current_limit: u64,
    config: &GovernorConfig,
) -> bool {
    if recent_sizes.len() < config.min_sample_size {
        return false;
    }

    let window = &recent_sizes[recent_sizes.len() - config.min_sample_size..];
    let floor = (current_limit as f64 * config.emergency_utilization) as u64;
    let at_capacity = window.iter().filter(|&&s| s >= floor).count();

    at_capacity as f64 / window.len() as f64 >= config.emergency_threshold
}

/// Median of a set of preferred sizes, validated in ascending order.
pub fn consensus_vote_size(votes: &[MinerVote]) -> Option<u64> {
    if votes.is_empty() {
        return None;
    }
    let mut preferred: Vec<u64> = votes.iter().map(|v| v.preferred_size).collect();
    preferred.sort_unstable();
    Some(preferred[preferred.len() / 2])
}

/// Computes rolling-window statistics from the observed sizes.
pub fn compute_stats(recent_sizes: &[u64], current_limit: u64, config: &GovernorConfig) -> BlockSizeStats {
    if recent_sizes.is_empty() {
        return BlockSizeStats::default();
    }

    let sum: u64 = recent_sizes.iter().sum();
    let average = sum / recent_sizes.len() as u64;

    let mut sorted = recent_sizes.to_vec();
    sorted.sort_unstable();
    let median = sorted[sorted.len() / 2];

    let max = *sorted.last().unwrap();
    let min = *sorted.first().unwrap();

    let floor = (current_limit as f64 * config.emergency_utilization) as u64;
    let at_capacity = recent_sizes.iter().filter(|&&s| s >= floor).count();

    BlockSizeStats {
        average_size: average,
        median_size: median,
        max_size: max,
        min_size: min,
        utilization_rate: average as f64 / current_limit as f64,
        blocks_at_capacity: at_capacity,
    }
}
