//! Inbound ports (driving API) for the Block-Size Governor.

use crate::domain::entities::{BlockSizeStats, MinerVote};
use crate::domain::errors::GovernorError;

pub trait BlockSizeGovernorApi: Send + Sync {
    /// Returns the limit enforced at the given height.
    fn get_block_size_limit(&self, height: u64) -> u64;

    /// Validates a candidate block's serialized weight against the current
    /// limit, and the proposed transition against the decrease/increase bounds.
    fn validate_block_size_governance(
        &self,
        height: u64,
        serialized_weight: u64,
    ) -> Result<(), GovernorError>;

    /// Records an accepted block's weight and, every `adjustment_period`
    /// blocks, recomputes the limit and emergency-mode flag. Fails with
    /// `InvalidTransition` if the derived transition violates the
    /// decrease/increase bounds (should not happen given the clamped
    /// adjustment factor; defends against a misconfigured hard ceiling).
    fn on_block_accepted(
        &self,
        height: u64,
        serialized_weight: u64,
        vote: Option<MinerVote>,
    ) -> Result<(), GovernorError>;

    /// Current rolling-window statistics.
    fn get_block_size_stats(&self) -> BlockSizeStats;

    fn is_governance_active(&self, height: u64) -> bool;
}
