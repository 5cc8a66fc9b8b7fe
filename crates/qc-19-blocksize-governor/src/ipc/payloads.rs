//! IPC payloads for the Block-Size Governor.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateBlockSizeRequest {
    pub correlation_id: [u8; 16],
    pub height: u64,
    pub serialized_weight: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateBlockSizeResponse {
    pub correlation_id: [u8; 16],
    pub accepted: bool,
    pub current_limit: u64,
    pub error: Option<String>,
}
