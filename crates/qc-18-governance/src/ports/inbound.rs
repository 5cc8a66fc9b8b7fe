//! Inbound ports (driving API) for the Governance Engine.

use crate::domain::entities::{ExecutionDirective, GovernanceProposal};
use crate::domain::errors::GovernanceError;
use crate::domain::value_objects::{ProposalId, ProposalType, ValidatorId, VoteChoice};

pub trait GovernanceApi: Send + Sync {
    /// Create a new proposal at `height`. Rejects insufficient stake,
    /// oversized title/description, too many active proposals, and a
    /// conflicting active proposal of a single-slot category
    /// (`ProtocolUpgrade`, `GovernanceChange`).
    #[allow(clippy::too_many_arguments)]
    fn create_proposal(
        &self,
        proposer: ValidatorId,
        proposer_stake: u64,
        proposal_type: ProposalType,
        title: String,
        description: String,
        directive: ExecutionDirective,
        height: u64,
    ) -> Result<ProposalId, GovernanceError>;

    /// Cast a stake-weighted vote. Rejects a second vote from the same
    /// validator and votes after the voting period has closed.
    fn cast_vote(
        &self,
        proposal_id: ProposalId,
        voter: ValidatorId,
        voter_stake: u64,
        choice: VoteChoice,
        height: u64,
    ) -> Result<(), GovernanceError>;

    /// Tally a proposal once its voting period has closed, moving it to
    /// `Passed`/`Rejected`/`Expired` and into `completed_proposals`.
    fn tally_proposal(
        &self,
        proposal_id: ProposalId,
        height: u64,
        total_stake_supply: u64,
    ) -> Result<crate::domain::entities::TallyResult, GovernanceError>;

    /// Execute a passed proposal once its execution delay has elapsed,
    /// returning the directive to publish over the shared bus.
    fn execute_proposal(
        &self,
        proposal_id: ProposalId,
        height: u64,
    ) -> Result<ExecutionDirective, GovernanceError>;

    fn get_proposal(&self, proposal_id: ProposalId) -> Option<GovernanceProposal>;

    fn active_proposal_count(&self) -> usize;
}
