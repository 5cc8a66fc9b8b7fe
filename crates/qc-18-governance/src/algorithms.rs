//! Pure tallying logic for governance proposals.

use crate::config::GovernanceConfig;
use crate::domain::entities::{GovernanceProposal, TallyResult};

/// Tally a proposal's votes against the total staked supply at the
/// time voting closed. Passing requires both a minimum participation
/// rate and an approval rate (yes / (yes + no + abstain), abstains
/// counted in the denominator but not the numerator) meeting the
/// category's threshold.
pub fn tally(proposal: &GovernanceProposal, config: &GovernanceConfig, total_stake_supply: u64) -> TallyResult {
    let total_voted = proposal.total_voted_stake();
    let participation_rate = if total_stake_supply == 0 {
        0.0
    } else {
        total_voted as f64 / total_stake_supply as f64
    };

    let approval_rate = if total_voted == 0 {
        0.0
    } else {
        proposal.yes_stake as f64 / total_voted as f64
    };

    let threshold = config.approval_threshold_for(proposal.proposal_type);
    let passed = participation_rate >= config.min_participation && approval_rate >= threshold;

    TallyResult {
        participation_rate,
        approval_rate,
        passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ExecutionDirective, ParameterValue};
    use crate::domain::value_objects::{ProposalId, ProposalType, VoteChoice};
    use primitive_types::H160;

    fn proposal_with_votes(proposal_type: ProposalType, votes: &[(u64, VoteChoice)]) -> GovernanceProposal {
        let mut p = GovernanceProposal::new(
            ProposalId::new_v4(),
            H160::zero(),
            proposal_type,
            "t".to_string(),
            "d".to_string(),
            10_000,
            0,
            2016,
            ExecutionDirective::SetParameter {
                name: "x".to_string(),
                value: ParameterValue::Bool(true),
            },
        );
        for (i, (stake, choice)) in votes.iter().enumerate() {
            p.cast_vote(H160::from_low_u64_be(i as u64 + 1), *choice, *stake);
        }
        p
    }

    #[test]
    fn test_passes_with_sufficient_participation_and_approval() {
        let config = GovernanceConfig::default();
        let p = proposal_with_votes(
            ProposalType::ParameterChange,
            &[(700_000, VoteChoice::Yes), (200_000, VoteChoice::No)],
        );
        let result = tally(&p, &config, 1_000_000);
        assert!(result.passed);
        assert!((result.participation_rate - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_fails_on_low_participation() {
        let config = GovernanceConfig::default();
        let p = proposal_with_votes(ProposalType::ParameterChange, &[(100_000, VoteChoice::Yes)]);
        let result = tally(&p, &config, 1_000_000);
        assert!(!result.passed);
    }

    #[test]
    fn test_fails_on_low_approval() {
        let config = GovernanceConfig::default();
        let p = proposal_with_votes(
            ProposalType::ParameterChange,
            &[(400_000, VoteChoice::Yes), (400_000, VoteChoice::No)],
        );
        let result = tally(&p, &config, 1_000_000);
        assert!(!result.passed);
    }

    #[test]
    fn test_abstain_stake_counts_against_approval_denominator() {
        let config = GovernanceConfig::default();
        let p = proposal_with_votes(
            ProposalType::ParameterChange,
            &[
                (500_000, VoteChoice::Yes),
                (100_000, VoteChoice::No),
                (400_000, VoteChoice::Abstain),
            ],
        );
        let result = tally(&p, &config, 1_000_000);
        assert!((result.approval_rate - 0.5).abs() < 1e-9);
        assert!(!result.passed, "abstain stake must count against approval, not be excluded");
    }

    #[test]
    fn test_emergency_needs_higher_approval() {
        let config = GovernanceConfig::default();
        let p = proposal_with_votes(
            ProposalType::EmergencyAction,
            &[(850_000, VoteChoice::Yes), (150_000, VoteChoice::No)],
        );
        let result = tally(&p, &config, 1_000_000);
        assert!(!result.passed, "0.85 approval should not clear the 0.90 emergency bar");
    }
}
