//! IPC handler for the Governance Engine.
//!
//! ## Security Boundaries
//!
//! - MUST validate `sender_id == AUTHORIZED_SENDER` (Consensus).

use crate::application::service::GovernanceEngine;
use crate::domain::value_objects::ValidatorId;
use crate::ipc::payloads::{
    CastVoteRequest, CastVoteResponse, CreateProposalRequest, CreateProposalResponse,
    ExecuteProposalRequest, ExecuteProposalResponse, TallyProposalRequest, TallyProposalResponse,
};
use crate::ports::inbound::GovernanceApi;
use tracing::warn;
use uuid::Uuid;

const AUTHORIZED_SENDER: u8 = 8;

pub struct GovernanceHandler {
    service: GovernanceEngine,
}

impl GovernanceHandler {
    pub fn new(service: GovernanceEngine) -> Self {
        Self { service }
    }

    pub fn handle_create_proposal(
        &self,
        sender_id: u8,
        request: CreateProposalRequest,
    ) -> CreateProposalResponse {
        if sender_id != AUTHORIZED_SENDER {
            warn!(sender_id, "unauthorized CreateProposalRequest rejected");
            return CreateProposalResponse {
                correlation_id: request.correlation_id,
                proposal_id: None,
                error: Some(format!(
                    "unauthorized sender: expected {AUTHORIZED_SENDER}, got {sender_id}"
                )),
            };
        }

        let proposer = ValidatorId::from(request.proposer);
        match self.service.create_proposal(
            proposer,
            request.proposer_stake,
            request.proposal_type,
            request.title,
            request.description,
            request.directive,
            request.height,
        ) {
            Ok(id) => CreateProposalResponse {
                correlation_id: request.correlation_id,
                proposal_id: Some(*id.as_bytes()),
                error: None,
            },
            Err(e) => CreateProposalResponse {
                correlation_id: request.correlation_id,
                proposal_id: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn handle_cast_vote(&self, sender_id: u8, request: CastVoteRequest) -> CastVoteResponse {
        if sender_id != AUTHORIZED_SENDER {
            warn!(sender_id, "unauthorized CastVoteRequest rejected");
            return CastVoteResponse {
                correlation_id: request.correlation_id,
                accepted: false,
                error: Some(format!(
                    "unauthorized sender: expected {AUTHORIZED_SENDER}, got {sender_id}"
                )),
            };
        }

        let proposal_id = Uuid::from_bytes(request.proposal_id);
        let voter = ValidatorId::from(request.voter);
        match self.service.cast_vote(
            proposal_id,
            voter,
            request.voter_stake,
            request.choice,
            request.height,
        ) {
            Ok(()) => CastVoteResponse {
                correlation_id: request.correlation_id,
                accepted: true,
                error: None,
            },
            Err(e) => CastVoteResponse {
                correlation_id: request.correlation_id,
                accepted: false,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn handle_tally_proposal(
        &self,
        sender_id: u8,
        request: TallyProposalRequest,
    ) -> TallyProposalResponse {
        if sender_id != AUTHORIZED_SENDER {
            warn!(sender_id, "unauthorized TallyProposalRequest rejected");
            return TallyProposalResponse {
                correlation_id: request.correlation_id,
                participation_rate: 0.0,
                approval_rate: 0.0,
                passed: false,
                error: Some(format!(
                    "unauthorized sender: expected {AUTHORIZED_SENDER}, got {sender_id}"
                )),
            };
        }

        let proposal_id = Uuid::from_bytes(request.proposal_id);
        match self
            .service
            .tally_proposal(proposal_id, request.height, request.total_stake_supply)
        {
            Ok(result) => TallyProposalResponse {
                correlation_id: request.correlation_id,
                participation_rate: result.participation_rate,
                approval_rate: result.approval_rate,
                passed: result.passed,
                error: None,
            },
            Err(e) => TallyProposalResponse {
                correlation_id: request.correlation_id,
                participation_rate: 0.0,
                approval_rate: 0.0,
                passed: false,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn handle_execute_proposal(
        &self,
        sender_id: u8,
        request: ExecuteProposalRequest,
    ) -> ExecuteProposalResponse {
        if sender_id != AUTHORIZED_SENDER {
            warn!(sender_id, "unauthorized ExecuteProposalRequest rejected");
            return ExecuteProposalResponse {
                correlation_id: request.correlation_id,
                directive: None,
                error: Some(format!(
                    "unauthorized sender: expected {AUTHORIZED_SENDER}, got {sender_id}"
                )),
            };
        }

        let proposal_id = Uuid::from_bytes(request.proposal_id);
        match self.service.execute_proposal(proposal_id, request.height) {
            Ok(directive) => ExecuteProposalResponse {
                correlation_id: request.correlation_id,
                directive: Some(directive),
                error: None,
            },
            Err(e) => ExecuteProposalResponse {
                correlation_id: request.correlation_id,
                directive: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GovernanceConfig;
    use crate::domain::entities::{ExecutionDirective, ParameterValue};
    use crate::domain::value_objects::ProposalType;

    fn make_handler() -> GovernanceHandler {
        GovernanceHandler::new(GovernanceEngine::new(GovernanceConfig::for_testing()))
    }

    fn create_request() -> CreateProposalRequest {
        CreateProposalRequest {
            correlation_id: [0u8; 16],
            proposer: [1u8; 20],
            proposer_stake: 1_000,
            proposal_type: ProposalType::ParameterChange,
            title: "t".to_string(),
            description: "d".to_string(),
            directive: ExecutionDirective::SetParameter {
                name: "x".to_string(),
                value: ParameterValue::Bool(true),
            },
            height: 0,
        }
    }

    #[test]
    fn test_reject_unauthorized_sender() {
        let handler = make_handler();
        let response = handler.handle_create_proposal(3, create_request());
        assert!(response.proposal_id.is_none());
        assert!(response.error.is_some());
    }

    #[test]
    fn test_accept_authorized_sender() {
        let handler = make_handler();
        let response = handler.handle_create_proposal(8, create_request());
        assert!(response.proposal_id.is_some());
    }

    #[test]
    fn test_cast_vote_roundtrip() {
        let handler = make_handler();
        let created = handler.handle_create_proposal(8, create_request());
        let proposal_id = created.proposal_id.unwrap();

        let vote_response = handler.handle_cast_vote(
            8,
            CastVoteRequest {
                correlation_id: [0u8; 16],
                proposal_id,
                voter: [2u8; 20],
                voter_stake: 500,
                choice: crate::domain::value_objects::VoteChoice::Yes,
                height: 1,
            },
        );
        assert!(vote_response.accepted);
    }
}
