//! IPC handler for the Block-Size Governor.
//!
//! ## Security Boundaries
//!
//! - MUST validate `sender_id == AUTHORIZED_SENDER` (Consensus).

use crate::application::service::BlockSizeGovernor;
use crate::ipc::payloads::{ValidateBlockSizeRequest, ValidateBlockSizeResponse};
use crate::ports::inbound::BlockSizeGovernorApi;
use tracing::warn;

const AUTHORIZED_SENDER: u8 = 8;

pub struct BlockSizeGovernorHandler {
    governor: BlockSizeGovernor,
}

impl BlockSizeGovernorHandler {
    pub fn new(governor: BlockSizeGovernor) -> Self {
        Self { governor }
    }

    pub fn handle_validate_block_size(
        &self,
        sender_id: u8,
        request: ValidateBlockSizeRequest,
    ) -> ValidateBlockSizeResponse {
        if sender_id != AUTHORIZED_SENDER {
            warn!(sender_id, "unauthorized ValidateBlockSizeRequest rejected");
            return ValidateBlockSizeResponse {
                correlation_id: request.correlation_id,
                accepted: false,
                current_limit: 0,
                error: Some(format!(
                    "unauthorized sender: expected {AUTHORIZED_SENDER}, got {sender_id}"
                )),
            };
        }

        let limit = self.governor.get_block_size_limit(request.height);
        match self
            .governor
            .validate_block_size_governance(request.height, request.serialized_weight)
        {
            Ok(()) => ValidateBlockSizeResponse {
                correlation_id: request.correlation_id,
                accepted: true,
                current_limit: limit,
                error: None,
            },
            Err(e) => ValidateBlockSizeResponse {
                correlation_id: request.correlation_id,
                accepted: false,
                current_limit: limit,
                error: Some(e.to_string()),
            },
        }
    }
}
