//! IPC payloads for the Parameter Registry.
//!
//! Identity is derived solely from the `AuthenticatedMessage` envelope;
//! payloads carry no sender identity fields.

use crate::domain::entities::ParamValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetParameterRequest {
    pub correlation_id: [u8; 16],
    pub name: String,
    pub value: ParamValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetParameterResponse {
    pub correlation_id: [u8; 16],
    pub success: bool,
    pub error: Option<String>,
}
