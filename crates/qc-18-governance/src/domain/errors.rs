//! Error types for the Governance Engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("proposer stake {stake} below minimum {minimum}")]
    InsufficientStake { stake: u64, minimum: u64 },

    #[error("title exceeds {max} characters")]
    TitleTooLong { max: usize },

    #[error("description exceeds {max} characters")]
    DescriptionTooLong { max: usize },

    #[error("a conflicting proposal of this type is already active")]
    ConflictingProposal,

    #[error("too many active proposals: {count} >= {max}")]
    TooManyActiveProposals { count: usize, max: usize },

    #[error("proposal {id} not found")]
    ProposalNotFound { id: uuid::Uuid },

    #[error("validator {voter} has already voted on this proposal")]
    DuplicateVote { voter: String },

    #[error("voting period for proposal {id} has closed")]
    VotingClosed { id: uuid::Uuid },

    #[error("invalid parameter value: {reason}")]
    InvalidParameterValue { reason: String },

    #[error("emergency action proposals must carry non-empty action data")]
    EmptyEmergencyActionData,

    #[error("proposal {id} is not yet executable at height {height}")]
    NotYetExecutable { id: uuid::Uuid, height: u64 },

    #[error("proposal {id} did not pass and cannot be executed")]
    NotPassed { id: uuid::Uuid },

    #[error("unauthorized sender: expected {expected}, got {actual}")]
    UnauthorizedSender { expected: u8, actual: u8 },
}
