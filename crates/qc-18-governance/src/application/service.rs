//! Governance Engine service.
//!
//! Active and completed proposal maps live behind a single serializing
//! mutex, matching the per-subsystem locking discipline used across the
//! workspace's stateful controllers.

use crate::algorithms::tally;
use crate::config::GovernanceConfig;
use crate::domain::entities::{ExecutionDirective, GovernanceProposal, TallyResult};
use crate::domain::errors::GovernanceError;
use crate::domain::value_objects::{ProposalId, ProposalStatus, ProposalType, ValidatorId, VoteChoice};
use crate::ports::inbound::GovernanceApi;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

struct Proposals {
    active: HashMap<ProposalId, GovernanceProposal>,
    completed: HashMap<ProposalId, GovernanceProposal>,
}

pub struct GovernanceEngine {
    config: GovernanceConfig,
    proposals: Mutex<Proposals>,
}

impl GovernanceEngine {
    pub fn new(config: GovernanceConfig) -> Self {
        Self {
            config,
            proposals: Mutex::new(Proposals {
                active: HashMap::new(),
                completed: HashMap::new(),
            }),
        }
    }

    fn is_single_slot(proposal_type: ProposalType) -> bool {
        matches!(
            proposal_type,
            ProposalType::ProtocolUpgrade | ProposalType::GovernanceChange
        )
    }
}

impl Default for GovernanceEngine {
    fn default() -> Self {
        Self::new(GovernanceConfig::default())
    }
}

impl GovernanceApi for GovernanceEngine {
    fn create_proposal(
        &self,
        proposer: ValidatorId,
        proposer_stake: u64,
        proposal_type: ProposalType,
        title: String,
        description: String,
        directive: ExecutionDirective,
        height: u64,
    ) -> Result<ProposalId, GovernanceError> {
        let required_stake = self.config.required_stake_for(proposal_type);
        if proposer_stake < required_stake {
            return Err(GovernanceError::InsufficientStake {
                stake: proposer_stake,
                minimum: required_stake,
            });
        }
        if title.len() > self.config.max_title_len {
            return Err(GovernanceError::TitleTooLong {
                max: self.config.max_title_len,
            });
        }
        if description.len() > self.config.max_description_len {
            return Err(GovernanceError::DescriptionTooLong {
                max: self.config.max_description_len,
            });
        }
        if proposal_type.is_emergency() {
            let has_action_data = matches!(
                &directive,
                ExecutionDirective::TriggerEmergencyAction { action } if !action.is_empty()
            );
            if !has_action_data {
                return Err(GovernanceError::EmptyEmergencyActionData);
            }
        }

        let mut proposals = self.proposals.lock();

        if proposals.active.len() >= self.config.max_active_proposals {
            return Err(GovernanceError::TooManyActiveProposals {
                count: proposals.active.len(),
                max: self.config.max_active_proposals,
            });
        }

        if Self::is_single_slot(proposal_type)
            && proposals
                .active
                .values()
                .any(|p| p.proposal_type == proposal_type)
        {
            return Err(GovernanceError::ConflictingProposal);
        }

        let id = Uuid::new_v4();
        let proposal = GovernanceProposal::new(
            id,
            proposer,
            proposal_type,
            title,
            description,
            proposer_stake,
            height,
            self.config.voting_delay_blocks,
            self.config.voting_period_blocks,
            directive,
        );
        info!(proposal_id = %id, height, ?proposal_type, "governance proposal created");
        proposals.active.insert(id, proposal);
        Ok(id)
    }

    fn cast_vote(
        &self,
        proposal_id: ProposalId,
        voter: ValidatorId,
        voter_stake: u64,
        choice: VoteChoice,
        height: u64,
    ) -> Result<(), GovernanceError> {
        let mut proposals = self.proposals.lock();
        let proposal = proposals
            .active
            .get_mut(&proposal_id)
            .ok_or(GovernanceError::ProposalNotFound { id: proposal_id })?;

        proposal.activate_if_due(height);
        if !proposal.is_voting_open(height) {
            return Err(GovernanceError::VotingClosed { id: proposal_id });
        }

        if !proposal.cast_vote(voter, choice, voter_stake) {
            return Err(GovernanceError::DuplicateVote {
                voter: format!("{voter:?}"),
            });
        }
        Ok(())
    }

    fn tally_proposal(
        &self,
        proposal_id: ProposalId,
        height: u64,
        total_stake_supply: u64,
    ) -> Result<TallyResult, GovernanceError> {
        let mut proposals = self.proposals.lock();
        let proposal = proposals
            .active
            .get_mut(&proposal_id)
            .ok_or(GovernanceError::ProposalNotFound { id: proposal_id })?;

        proposal.activate_if_due(height);
        if height < proposal.voting_end_height {
            return Err(GovernanceError::NotYetExecutable {
                id: proposal_id,
                height,
            });
        }

        let result = tally(proposal, &self.config, total_stake_supply);
        proposal.status = if result.passed {
            ProposalStatus::Passed
        } else if result.participation_rate < self.config.min_participation {
            ProposalStatus::Expired
        } else {
            ProposalStatus::Rejected
        };

        info!(
            proposal_id = %proposal_id,
            passed = result.passed,
            participation_rate = result.participation_rate,
            approval_rate = result.approval_rate,
            "governance proposal tallied"
        );

        if proposal.status != ProposalStatus::Passed {
            let finished = proposals.active.remove(&proposal_id).expect("proposal present");
            proposals.completed.insert(proposal_id, finished);
        }

        Ok(result)
    }

    fn execute_proposal(
        &self,
        proposal_id: ProposalId,
        height: u64,
    ) -> Result<ExecutionDirective, GovernanceError> {
        let mut proposals = self.proposals.lock();
        let proposal = proposals
            .active
            .get_mut(&proposal_id)
            .ok_or(GovernanceError::ProposalNotFound { id: proposal_id })?;

        if proposal.status != ProposalStatus::Passed {
            return Err(GovernanceError::NotPassed { id: proposal_id });
        }

        let executable_at = proposal.voting_end_height + self.config.execution_delay_for(proposal.proposal_type);
        if height < executable_at {
            return Err(GovernanceError::NotYetExecutable {
                id: proposal_id,
                height,
            });
        }

        proposal.status = ProposalStatus::Executed;
        proposal.execution_height = Some(height);
        let directive = proposal.directive.clone();

        let finished = proposals.active.remove(&proposal_id).expect("proposal present");
        proposals.completed.insert(proposal_id, finished);

        info!(proposal_id = %proposal_id, height, "governance proposal executed");
        Ok(directive)
    }

    fn get_proposal(&self, proposal_id: ProposalId) -> Option<GovernanceProposal> {
        let proposals = self.proposals.lock();
        proposals
            .active
            .get(&proposal_id)
            .or_else(|| proposals.completed.get(&proposal_id))
            .cloned()
    }

    fn active_proposal_count(&self) -> usize {
        self.proposals.lock().active.len()
    }
}

#[allow(dead_code)]
fn log_failed_proposal(id: ProposalId) {
    warn!(proposal_id = %id, "proposal failed execution");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ParameterValue;
    use primitive_types::H160;

    fn engine() -> GovernanceEngine {
        GovernanceEngine::new(GovernanceConfig::for_testing())
    }

    fn directive() -> ExecutionDirective {
        ExecutionDirective::SetParameter {
            name: "blocksize.base".to_string(),
            value: ParameterValue::U64(2_000_000),
        }
    }

    #[test]
    fn test_create_proposal_rejects_insufficient_stake() {
        let e = engine();
        let result = e.create_proposal(
            H160::zero(),
            1,
            ProposalType::ParameterChange,
            "t".to_string(),
            "d".to_string(),
            directive(),
            0,
        );
        assert!(matches!(result, Err(GovernanceError::InsufficientStake { .. })));
    }

    #[test]
    fn test_critical_proposal_requires_doubled_stake() {
        let e = engine();
        let config = GovernanceConfig::for_testing();
        let result = e.create_proposal(
            H160::zero(),
            config.min_proposal_stake, // flat minimum, not enough for a critical proposal
            ProposalType::ProtocolUpgrade,
            "t".to_string(),
            "d".to_string(),
            directive(),
            0,
        );
        assert!(matches!(result, Err(GovernanceError::InsufficientStake { .. })));

        let result = e.create_proposal(
            H160::zero(),
            config.min_proposal_stake * 2,
            ProposalType::ProtocolUpgrade,
            "t2".to_string(),
            "d".to_string(),
            directive(),
            0,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_emergency_proposal_rejects_empty_action_data() {
        let e = engine();
        let config = GovernanceConfig::for_testing();
        let result = e.create_proposal(
            H160::zero(),
            config.min_proposal_stake * 5,
            ProposalType::EmergencyAction,
            "t".to_string(),
            "d".to_string(),
            ExecutionDirective::TriggerEmergencyAction { action: String::new() },
            0,
        );
        assert!(matches!(result, Err(GovernanceError::EmptyEmergencyActionData)));

        let result = e.create_proposal(
            H160::zero(),
            config.min_proposal_stake * 5,
            ProposalType::EmergencyAction,
            "t2".to_string(),
            "d".to_string(),
            ExecutionDirective::TriggerEmergencyAction {
                action: "halt".to_string(),
            },
            0,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_create_proposal_rejects_oversized_title() {
        let e = engine();
        let result = e.create_proposal(
            H160::zero(),
            1_000,
            ProposalType::ParameterChange,
            "x".repeat(201),
            "d".to_string(),
            directive(),
            0,
        );
        assert!(matches!(result, Err(GovernanceError::TitleTooLong { .. })));
    }

    #[test]
    fn test_conflicting_single_slot_proposal_rejected() {
        let e = engine();
        e.create_proposal(
            H160::zero(),
            1_000,
            ProposalType::ProtocolUpgrade,
            "upgrade 1".to_string(),
            "d".to_string(),
            directive(),
            0,
        )
        .unwrap();
        let result = e.create_proposal(
            H160::zero(),
            1_000,
            ProposalType::ProtocolUpgrade,
            "upgrade 2".to_string(),
            "d".to_string(),
            directive(),
            0,
        );
        assert!(matches!(result, Err(GovernanceError::ConflictingProposal)));
    }

    #[test]
    fn test_too_many_active_proposals_rejected() {
        let e = engine();
        for i in 0..3 {
            e.create_proposal(
                H160::zero(),
                1_000,
                ProposalType::ParameterChange,
                format!("p{i}"),
                "d".to_string(),
                directive(),
                0,
            )
            .unwrap();
        }
        let result = e.create_proposal(
            H160::zero(),
            1_000,
            ProposalType::ParameterChange,
            "p4".to_string(),
            "d".to_string(),
            directive(),
            0,
        );
        assert!(matches!(
            result,
            Err(GovernanceError::TooManyActiveProposals { .. })
        ));
    }

    #[test]
    fn test_vote_duplicate_rejected() {
        let e = engine();
        let id = e
            .create_proposal(
                H160::zero(),
                1_000,
                ProposalType::ParameterChange,
                "p".to_string(),
                "d".to_string(),
                directive(),
                0,
            )
            .unwrap();
        let voter = H160::from_low_u64_be(1);
        e.cast_vote(id, voter, 500, VoteChoice::Yes, 1).unwrap();
        let result = e.cast_vote(id, voter, 500, VoteChoice::No, 1);
        assert!(matches!(result, Err(GovernanceError::DuplicateVote { .. })));
    }

    #[test]
    fn test_vote_after_close_rejected() {
        let e = engine();
        let id = e
            .create_proposal(
                H160::zero(),
                1_000,
                ProposalType::ParameterChange,
                "p".to_string(),
                "d".to_string(),
                directive(),
                0,
            )
            .unwrap();
        let result = e.cast_vote(id, H160::from_low_u64_be(1), 500, VoteChoice::Yes, 100);
        assert!(matches!(result, Err(GovernanceError::VotingClosed { .. })));
    }

    #[test]
    fn test_full_lifecycle_pass_and_execute() {
        let e = engine();
        let config = GovernanceConfig::for_testing();
        let id = e
            .create_proposal(
                H160::zero(),
                1_000,
                ProposalType::ParameterChange,
                "p".to_string(),
                "d".to_string(),
                directive(),
                0,
            )
            .unwrap();
        e.cast_vote(id, H160::from_low_u64_be(1), 900_000, VoteChoice::Yes, 1)
            .unwrap();
        e.cast_vote(id, H160::from_low_u64_be(2), 100_000, VoteChoice::No, 1)
            .unwrap();

        let close_height = config.voting_period_blocks;
        let result = e.tally_proposal(id, close_height, 1_000_000).unwrap();
        assert!(result.passed);

        let exec_height = close_height + config.execution_delay_blocks;
        let directive_out = e.execute_proposal(id, exec_height).unwrap();
        assert!(matches!(directive_out, ExecutionDirective::SetParameter { .. }));

        let stored = e.get_proposal(id).unwrap();
        assert_eq!(stored.status, ProposalStatus::Executed);
        assert_eq!(e.active_proposal_count(), 0);
    }

    #[test]
    fn test_execute_before_delay_rejected() {
        let e = engine();
        let config = GovernanceConfig::for_testing();
        let id = e
            .create_proposal(
                H160::zero(),
                1_000,
                ProposalType::ParameterChange,
                "p".to_string(),
                "d".to_string(),
                directive(),
                0,
            )
            .unwrap();
        e.cast_vote(id, H160::from_low_u64_be(1), 900_000, VoteChoice::Yes, 1)
            .unwrap();
        let close_height = config.voting_period_blocks;
        e.tally_proposal(id, close_height, 1_000_000).unwrap();

        let result = e.execute_proposal(id, close_height);
        assert!(matches!(result, Err(GovernanceError::NotYetExecutable { .. })));
    }

    #[test]
    fn test_rejected_proposal_cannot_execute() {
        let e = engine();
        let config = GovernanceConfig::for_testing();
        let id = e
            .create_proposal(
                H160::zero(),
                1_000,
                ProposalType::ParameterChange,
                "p".to_string(),
                "d".to_string(),
                directive(),
                0,
            )
            .unwrap();
        e.cast_vote(id, H160::from_low_u64_be(1), 900_000, VoteChoice::No, 1)
            .unwrap();
        let close_height = config.voting_period_blocks;
        let result = e.tally_proposal(id, close_height, 1_000_000).unwrap();
        assert!(!result.passed);

        let exec = e.execute_proposal(id, close_height + config.execution_delay_blocks);
        assert!(matches!(exec, Err(GovernanceError::NotPassed { .. })));
    }
}
