//! IPC payloads for the Governance Engine.
//!
//! ## Security (envelope-only identity)
//!
//! Payloads carry no sender identity fields; identity is derived solely
//! from the `AuthenticatedMessage` envelope.

use crate::domain::entities::ExecutionDirective;
use crate::domain::value_objects::{ProposalType, VoteChoice};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProposalRequest {
    pub correlation_id: [u8; 16],
    pub proposer: [u8; 20],
    pub proposer_stake: u64,
    pub proposal_type: ProposalType,
    pub title: String,
    pub description: String,
    pub directive: ExecutionDirective,
    pub height: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProposalResponse {
    pub correlation_id: [u8; 16],
    pub proposal_id: Option<[u8; 16]>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastVoteRequest {
    pub correlation_id: [u8; 16],
    pub proposal_id: [u8; 16],
    pub voter: [u8; 20],
    pub voter_stake: u64,
    pub choice: VoteChoice,
    pub height: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastVoteResponse {
    pub correlation_id: [u8; 16],
    pub accepted: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TallyProposalRequest {
    pub correlation_id: [u8; 16],
    pub proposal_id: [u8; 16],
    pub height: u64,
    pub total_stake_supply: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TallyProposalResponse {
    pub correlation_id: [u8; 16],
    pub participation_rate: f64,
    pub approval_rate: f64,
    pub passed: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteProposalRequest {
    pub correlation_id: [u8; 16],
    pub proposal_id: [u8; 16],
    pub height: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteProposalResponse {
    pub correlation_id: [u8; 16],
    pub directive: Option<ExecutionDirective>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_proposal_request_serialization() {
        let request = CreateProposalRequest {
            correlation_id: [0u8; 16],
            proposer: [1u8; 20],
            proposer_stake: 10_000,
            proposal_type: ProposalType::ParameterChange,
            title: "t".to_string(),
            description: "d".to_string(),
            directive: ExecutionDirective::BumpProtocolVersion { new_version: 2 },
            height: 100,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("proposer_stake"));
    }
}
