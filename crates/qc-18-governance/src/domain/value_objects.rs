//! Value objects for the Governance Engine.

use primitive_types::H160;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ProposalId = Uuid;
pub type ValidatorId = H160;

/// Category of a governance proposal. Each category carries its own
/// approval threshold and, for `EmergencyAction`, its own (shorter)
/// execution delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalType {
    ParameterChange,
    ProtocolUpgrade,
    ValidatorManagement,
    EmergencyAction,
    GovernanceChange,
    Custom,
}

impl ProposalType {
    /// Protocol-level changes that get the higher "critical" approval bar
    /// and a doubled proposal-stake requirement.
    pub fn is_critical(self) -> bool {
        matches!(self, ProposalType::ProtocolUpgrade | ProposalType::GovernanceChange)
    }

    pub fn is_emergency(self) -> bool {
        matches!(self, ProposalType::EmergencyAction)
    }
}

/// Lifecycle status of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Created but not yet past `voting_start_height`.
    Pending,
    Active,
    Passed,
    Rejected,
    Failed,
    Executed,
    Expired,
}

impl ProposalStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, ProposalStatus::Pending | ProposalStatus::Active)
    }
}

/// A validator's choice on a single proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteChoice {
    Yes,
    No,
    Abstain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_is_nonterminal() {
        assert!(!ProposalStatus::Pending.is_terminal());
        assert!(!ProposalStatus::Active.is_terminal());
        assert!(ProposalStatus::Passed.is_terminal());
        assert!(ProposalStatus::Rejected.is_terminal());
        assert!(ProposalStatus::Failed.is_terminal());
        assert!(ProposalStatus::Executed.is_terminal());
        assert!(ProposalStatus::Expired.is_terminal());
    }
}
