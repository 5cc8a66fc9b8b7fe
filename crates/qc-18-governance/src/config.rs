//! Configuration for the Governance Engine.

use crate::domain::value_objects::ProposalType;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceConfig {
    pub min_proposal_stake: u64,
    /// Blocks between a proposal's creation and voting opening. Zero
    /// means voting opens at the creation height.
    pub voting_delay_blocks: u64,
    pub voting_period_blocks: u64,
    pub min_participation: f64,
    pub approval_threshold: f64,
    pub critical_approval_threshold: f64,
    pub emergency_approval_threshold: f64,
    pub max_active_proposals: usize,
    pub execution_delay_blocks: u64,
    pub emergency_execution_delay_blocks: u64,
    pub max_title_len: usize,
    pub max_description_len: usize,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            min_proposal_stake: 10_000,
            voting_delay_blocks: 0,
            voting_period_blocks: 2016,
            min_participation: 0.33,
            approval_threshold: 0.67,
            critical_approval_threshold: 0.80,
            emergency_approval_threshold: 0.90,
            max_active_proposals: 10,
            execution_delay_blocks: 144,
            emergency_execution_delay_blocks: 1,
            max_title_len: 200,
            max_description_len: 10_000,
        }
    }
}

impl GovernanceConfig {
    pub fn for_testing() -> Self {
        Self {
            min_proposal_stake: 100,
            voting_period_blocks: 10,
            execution_delay_blocks: 2,
            emergency_execution_delay_blocks: 1,
            max_active_proposals: 3,
            ..Self::default()
        }
    }

    /// Approval threshold that applies to a given proposal category.
    pub fn approval_threshold_for(&self, proposal_type: ProposalType) -> f64 {
        match proposal_type {
            ProposalType::EmergencyAction => self.emergency_approval_threshold,
            ProposalType::ProtocolUpgrade | ProposalType::GovernanceChange => {
                self.critical_approval_threshold
            }
            ProposalType::ParameterChange => self.approval_threshold,
        }
    }

    /// Execution delay that applies to a given proposal category.
    pub fn execution_delay_for(&self, proposal_type: ProposalType) -> u64 {
        match proposal_type {
            ProposalType::EmergencyAction => self.emergency_execution_delay_blocks,
            _ => self.execution_delay_blocks,
        }
    }

    /// Proposer stake required to open a proposal of this category: the
    /// flat minimum, doubled for critical categories and multiplied
    /// fivefold for emergency actions.
    pub fn required_stake_for(&self, proposal_type: ProposalType) -> u64 {
        if proposal_type.is_emergency() {
            self.min_proposal_stake.saturating_mul(5)
        } else if proposal_type.is_critical() {
            self.min_proposal_stake.saturating_mul(2)
        } else {
            self.min_proposal_stake
        }
    }
}
