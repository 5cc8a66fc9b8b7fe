//! Block-Size Governor service.
//!
//! `BlockSizeState` lives behind a single serializing mutex, matching the
//! per-subsystem locking discipline used across the workspace's stateful
//! controllers: all structural mutations happen under one lock, reads that
//! need a consistent view take a short snapshot copy.

use crate::algorithms::{adjustment_factor, compute_stats, consensus_vote_size, should_activate_emergency};
use crate::config::GovernorConfig;
use crate::domain::entities::{BlockSizeStats, BlockSizeState, MinerVote};
use crate::domain::errors::GovernorError;
use crate::ports::inbound::BlockSizeGovernorApi;
use parking_lot::Mutex;
use tracing::{info, warn};

pub struct BlockSizeGovernor {
    config: GovernorConfig,
    state: Mutex<BlockSizeState>,
    votes: Mutex<Vec<MinerVote>>,
}

impl BlockSizeGovernor {
    pub fn new(config: GovernorConfig) -> Self {
        let state = BlockSizeState::new(config.base_size);
        Self {
            config,
            state: Mutex::new(state),
            votes: Mutex::new(Vec::new()),
        }
    }

    /// Validates and records a miner-encoded size preference for the
    /// current adjustment window.
    pub fn submit_vote(&self, vote: MinerVote) -> Result<(), GovernorError> {
        if vote.preferred_size < self.config.base_size {
            return Err(GovernorError::InvalidVote {
                reason: format!(
                    "preferred_size {} below base {}",
                    vote.preferred_size, self.config.base_size
                ),
            });
        }
        if vote.max_size < vote.preferred_size {
            return Err(GovernorError::InvalidVote {
                reason: "max_size below preferred_size".to_string(),
            });
        }
        if vote.max_size > self.config.hard_ceiling {
            return Err(GovernorError::InvalidVote {
                reason: format!(
                    "max_size {} exceeds hard ceiling {}",
                    vote.max_size, self.config.hard_ceiling
                ),
            });
        }

        self.votes.lock().push(vote);
        Ok(())
    }

    fn apply_transition(
        &self,
        state: &mut BlockSizeState,
        new_limit: u64,
    ) -> Result<(), GovernorError> {
        let ratio = new_limit as f64 / state.current_limit as f64;
        if !(self.config.max_decrease_factor..=self.config.max_increase_factor).contains(&ratio) {
            return Err(GovernorError::InvalidTransition {
                ratio,
                min: self.config.max_decrease_factor,
                max: self.config.max_increase_factor,
            });
        }
        state.current_limit = new_limit;
        Ok(())
    }
}

impl BlockSizeGovernorApi for BlockSizeGovernor {
    fn get_block_size_limit(&self, height: u64) -> u64 {
        if !self.is_governance_active(height) {
            return self.config.base_size;
        }
        self.state.lock().current_limit
    }

    fn validate_block_size_governance(
        &self,
        _height: u64,
        serialized_weight: u64,
    ) -> Result<(), GovernorError> {
        let limit = self.state.lock().current_limit;
        if serialized_weight > limit {
            return Err(GovernorError::SizeOverLimit {
                size: serialized_weight,
                limit,
            });
        }
        Ok(())
    }

    fn on_block_accepted(
        &self,
        height: u64,
        serialized_weight: u64,
        vote: Option<MinerVote>,
    ) -> Result<(), GovernorError> {
        if let Some(v) = vote {
            // Best-effort: a malformed vote is logged and dropped, it never
            // blocks block acceptance.
            if let Err(e) = self.submit_vote(v) {
                warn!(error = %e, "dropping invalid miner vote");
            }
        }

        if !self.is_governance_active(height) {
            return Ok(());
        }

        let mut state = self.state.lock();
        state.record_block(serialized_weight);

        if should_activate_emergency(
            state.recent_sizes.make_contiguous(),
            state.current_limit,
            &self.config,
        ) {
            if !state.emergency_mode {
                info!(height, "block-size emergency scaling activated");
            }
            state.emergency_mode = true;
            let emergency_limit = ((state.current_limit as f64 * self.config.emergency_multiplier)
                as u64)
                .min(self.config.hard_ceiling);
            state.current_limit = emergency_limit;
            state.blocks_since_adjustment = 0;
            return Ok(());
        }
        state.emergency_mode = false;

        if state.blocks_since_adjustment < self.config.adjustment_period {
            return Ok(());
        }

        let sizes: Vec<u64> = state.recent_sizes.iter().copied().collect();
        let utilization = if sizes.is_empty() {
            0.0
        } else {
            sizes.iter().sum::<u64>() as f64 / sizes.len() as f64 / state.current_limit as f64
        };
        let factor = adjustment_factor(utilization, &self.config);
        state.adjustment_factor = factor;

        let mut votes = self.votes.lock();
        let mut new_limit =
            (self.config.base_size).max((state.current_limit as f64 * factor).floor() as u64);

        if (factor - 1.0).abs() > self.config.vote_influence_threshold {
            if let Some(consensus_size) = consensus_vote_size(&votes) {
                new_limit = consensus_size.min(self.config.hard_ceiling);
            }
        }
        votes.clear();

        self.apply_transition(&mut state, new_limit)?;
        state.blocks_since_adjustment = 0;

        info!(
            height,
            new_limit = state.current_limit,
            factor,
            "block-size governance adjustment applied"
        );

        Ok(())
    }

    fn get_block_size_stats(&self) -> BlockSizeStats {
        let state = self.state.lock();
        let sizes: Vec<u64> = state.recent_sizes.iter().copied().collect();
        compute_stats(&sizes, state.current_limit, &self.config)
    }

    fn is_governance_active(&self, height: u64) -> bool {
        height >= self.config.activation_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn governor() -> BlockSizeGovernor {
        BlockSizeGovernor::new(GovernorConfig::for_testing())
    }

    #[test]
    fn test_inactive_before_activation_height() {
        let config = GovernorConfig {
            activation_height: 100,
            ..GovernorConfig::for_testing()
        };
        let g = BlockSizeGovernor::new(config);
        assert!(!g.is_governance_active(50));
        assert_eq!(g.get_block_size_limit(50), 1_000);
    }

    #[test]
    fn test_reject_block_over_limit() {
        let g = governor();
        let result = g.validate_block_size_governance(0, 10_000);
        assert!(matches!(result, Err(GovernorError::SizeOverLimit { .. })));
    }

    #[test]
    fn test_periodic_adjustment_increases_limit_under_high_utilization() {
        let g = governor();
        for h in 0..10 {
            // below the 95% emergency floor, above the 80% growth threshold
            g.on_block_accepted(h, 900, None).unwrap();
        }
        let limit = g.get_block_size_limit(9);
        assert!(limit > 1_000, "limit {limit} should have grown under high utilization");
    }

    #[test]
    fn test_periodic_adjustment_decreases_limit_after_growth() {
        let g = governor();
        // first grow the limit well above base...
        for h in 0..10 {
            g.on_block_accepted(h, 900, None).unwrap();
        }
        let grown = g.get_block_size_limit(9);
        assert!(grown > 1_000);

        // ...then starve it so utilization against the grown limit is low.
        for h in 10..20 {
            g.on_block_accepted(h, 10, None).unwrap();
        }
        let shrunk = g.get_block_size_limit(19);
        assert!(shrunk < grown, "limit {shrunk} should have shrunk from {grown}");
        assert!(shrunk >= 1_000, "limit should never fall below base_size");
    }

    #[test]
    fn test_emergency_mode_activates_and_multiplies_limit() {
        let g = governor();
        for h in 0..5 {
            g.on_block_accepted(h, 1_000, None).unwrap();
        }
        let stats = g.get_block_size_stats();
        assert_eq!(stats.blocks_at_capacity, 5);
        assert_eq!(g.get_block_size_limit(4), 4_000);
    }

    #[test]
    fn test_vote_validation_rejects_low_preferred_size() {
        let g = governor();
        let result = g.submit_vote(MinerVote {
            preferred_size: 1,
            max_size: 2_000,
            timestamp: 0,
        });
        assert!(matches!(result, Err(GovernorError::InvalidVote { .. })));
    }

    #[test]
    fn test_vote_validation_rejects_max_below_preferred() {
        let g = governor();
        let result = g.submit_vote(MinerVote {
            preferred_size: 2_000,
            max_size: 1_000,
            timestamp: 0,
        });
        assert!(matches!(result, Err(GovernorError::InvalidVote { .. })));
    }

    #[test]
    fn test_stats_reflect_recent_window() {
        let g = governor();
        g.on_block_accepted(0, 100, None).unwrap();
        g.on_block_accepted(1, 200, None).unwrap();
        g.on_block_accepted(2, 300, None).unwrap();
        let stats = g.get_block_size_stats();
        assert_eq!(stats.average_size, 200);
        assert_eq!(stats.median_size, 200);
        assert_eq!(stats.max_size, 300);
        assert_eq!(stats.min_size, 100);
    }
}
