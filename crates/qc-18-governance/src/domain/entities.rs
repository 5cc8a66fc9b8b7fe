//! Core entities for the Governance Engine.

use super::value_objects::{ProposalId, ProposalStatus, ProposalType, ValidatorId, VoteChoice};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single recorded vote, kept so a validator can change its vote
/// before the voting period closes without corrupting the running
/// stake-weighted tallies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub voter: ValidatorId,
    pub choice: VoteChoice,
    pub stake_weight: u64,
}

/// A governance proposal and its running vote tally.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceProposal {
    pub id: ProposalId,
    pub proposer: ValidatorId,
    pub proposal_type: ProposalType,
    pub title: String,
    pub description: String,
    pub proposer_stake: u64,
    pub created_height: u64,
    pub voting_start_height: u64,
    pub voting_end_height: u64,
    pub execution_height: Option<u64>,
    pub status: ProposalStatus,
    pub is_critical: bool,
    pub is_emergency: bool,
    pub votes: HashMap<ValidatorId, VoteRecord>,
    pub yes_stake: u64,
    pub no_stake: u64,
    pub abstain_stake: u64,
    pub directive: ExecutionDirective,
}

impl GovernanceProposal {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ProposalId,
        proposer: ValidatorId,
        proposal_type: ProposalType,
        title: String,
        description: String,
        proposer_stake: u64,
        created_height: u64,
        voting_delay_blocks: u64,
        voting_period_blocks: u64,
        directive: ExecutionDirective,
    ) -> Self {
        let voting_start_height = created_height + voting_delay_blocks;
        Self {
            id,
            proposer,
            proposal_type,
            title,
            description,
            proposer_stake,
            created_height,
            voting_start_height,
            voting_end_height: voting_start_height + voting_period_blocks,
            execution_height: None,
            status: ProposalStatus::Pending,
            is_critical: proposal_type.is_critical(),
            is_emergency: proposal_type.is_emergency(),
            votes: HashMap::new(),
            yes_stake: 0,
            no_stake: 0,
            abstain_stake: 0,
            directive,
        }
    }

    /// Advances `Pending` to `Active` once `height` reaches
    /// `voting_start_height`. A no-op once voting has already opened.
    pub fn activate_if_due(&mut self, height: u64) {
        if self.status == ProposalStatus::Pending && height >= self.voting_start_height {
            self.status = ProposalStatus::Active;
        }
    }

    /// Records a validator's vote, adjusting the running tallies.
    /// Returns `false` if this validator has already voted (each
    /// validator gets exactly one vote per proposal).
    pub fn cast_vote(&mut self, voter: ValidatorId, choice: VoteChoice, stake_weight: u64) -> bool {
        if self.votes.contains_key(&voter) {
            return false;
        }
        self.add_stake(choice, stake_weight);
        self.votes.insert(
            voter,
            VoteRecord {
                voter,
                choice,
                stake_weight,
            },
        );
        true
    }

    fn add_stake(&mut self, choice: VoteChoice, stake: u64) {
        match choice {
            VoteChoice::Yes => self.yes_stake += stake,
            VoteChoice::No => self.no_stake += stake,
            VoteChoice::Abstain => self.abstain_stake += stake,
        }
    }

    pub fn total_voted_stake(&self) -> u64 {
        self.yes_stake + self.no_stake + self.abstain_stake
    }

    pub fn is_voting_open(&self, height: u64) -> bool {
        self.status == ProposalStatus::Active
            && height >= self.voting_start_height
            && height < self.voting_end_height
    }
}

/// Outcome of tallying a single proposal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TallyResult {
    pub participation_rate: f64,
    pub approval_rate: f64,
    pub passed: bool,
}

/// What executing a passed proposal should cause downstream, published
/// over the shared bus rather than invoked directly (cross-subsystem
/// calls are never made in-process).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ExecutionDirective {
    SetParameter { name: String, value: ParameterValue },
    BumpProtocolVersion { new_version: u32 },
    TriggerEmergencyAction { action: String },
}

/// A minimal stand-in for registry parameter values, avoiding a
/// dependency on the registry crate's own type for a single enum.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ParameterValue {
    U64(u64),
    F64(f64),
    Bool(bool),
    String(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitive_types::H160;

    fn proposal() -> GovernanceProposal {
        let mut p = GovernanceProposal::new(
            ProposalId::new_v4(),
            H160::zero(),
            ProposalType::ParameterChange,
            "title".to_string(),
            "description".to_string(),
            10_000,
            100,
            0,
            2016,
            ExecutionDirective::SetParameter {
                name: "blocksize.base".to_string(),
                value: ParameterValue::U64(2_000_000),
            },
        );
        p.activate_if_due(100);
        p
    }

    #[test]
    fn test_cast_vote_updates_tally() {
        let mut p = proposal();
        let voter = H160::from_low_u64_be(1);
        assert!(p.cast_vote(voter, VoteChoice::Yes, 500));
        assert_eq!(p.yes_stake, 500);
        assert_eq!(p.total_voted_stake(), 500);
    }

    #[test]
    fn test_duplicate_vote_rejected() {
        let mut p = proposal();
        let voter = H160::from_low_u64_be(1);
        assert!(p.cast_vote(voter, VoteChoice::Yes, 500));
        assert!(!p.cast_vote(voter, VoteChoice::No, 500));
        assert_eq!(p.yes_stake, 500);
        assert_eq!(p.no_stake, 0);
    }

    #[test]
    fn test_voting_window() {
        let p = proposal();
        assert!(p.is_voting_open(100));
        assert!(!p.is_voting_open(100 + 2016));
    }

    #[test]
    fn test_pending_until_voting_start_height() {
        let mut p = GovernanceProposal::new(
            ProposalId::new_v4(),
            H160::zero(),
            ProposalType::ParameterChange,
            "title".to_string(),
            "description".to_string(),
            10_000,
            100,
            10,
            2016,
            ExecutionDirective::SetParameter {
                name: "blocksize.base".to_string(),
                value: ParameterValue::U64(2_000_000),
            },
        );
        assert_eq!(p.status, ProposalStatus::Pending);
        assert!(!p.is_voting_open(105));

        p.activate_if_due(105);
        assert_eq!(p.status, ProposalStatus::Pending, "not yet due");

        p.activate_if_due(110);
        assert_eq!(p.status, ProposalStatus::Active);
        assert!(p.is_voting_open(110));
    }

    #[test]
    fn test_critical_and_emergency_flags_set_from_type() {
        assert!(ProposalType::ProtocolUpgrade.is_critical());
        assert!(ProposalType::GovernanceChange.is_critical());
        assert!(!ProposalType::ParameterChange.is_critical());
        assert!(ProposalType::EmergencyAction.is_emergency());
        assert!(!ProposalType::ParameterChange.is_emergency());
    }
}
