//! IPC handler for the Parameter Registry.
//!
//! ## Security Boundaries
//!
//! - MUST validate `sender_id == AUTHORIZED_SENDER` (Governance).
//! - MUST reject requests from any other subsystem.

use crate::application::service::ParameterRegistryService;
use crate::ipc::payloads::{SetParameterRequest, SetParameterResponse};
use crate::ports::inbound::ParameterRegistryApi;
use tracing::{info, warn};

/// Governance is the sole runtime mutator of registered parameters.
const AUTHORIZED_SENDER: u8 = 18;

pub struct ParameterRegistryHandler {
    service: ParameterRegistryService,
}

impl ParameterRegistryHandler {
    pub fn new(service: ParameterRegistryService) -> Self {
        Self { service }
    }

    pub fn handle_set_parameter(
        &self,
        sender_id: u8,
        request: SetParameterRequest,
    ) -> SetParameterResponse {
        if sender_id != AUTHORIZED_SENDER {
            warn!(sender_id, "unauthorized SetParameterRequest rejected");
            return SetParameterResponse {
                correlation_id: request.correlation_id,
                success: false,
                error: Some(format!(
                    "unauthorized sender: expected {AUTHORIZED_SENDER}, got {sender_id}"
                )),
            };
        }

        match self.service.set(&request.name, request.value) {
            Ok(()) => {
                info!(parameter = %request.name, "parameter set via governance");
                SetParameterResponse {
                    correlation_id: request.correlation_id,
                    success: true,
                    error: None,
                }
            }
            Err(e) => SetParameterResponse {
                correlation_id: request.correlation_id,
                success: false,
                error: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ParamValue;

    fn make_handler() -> ParameterRegistryHandler {
        ParameterRegistryHandler::new(ParameterRegistryService::new())
    }

    #[test]
    fn test_reject_unauthorized_sender() {
        let handler = make_handler();
        let response = handler.handle_set_parameter(
            3,
            SetParameterRequest {
                correlation_id: [0u8; 16],
                name: "blocksize.base".to_string(),
                value: ParamValue::U64(2_000_000),
            },
        );
        assert!(!response.success);
        assert!(response.error.unwrap().contains("unauthorized"));
    }

    #[test]
    fn test_accept_authorized_sender() {
        let handler = make_handler();
        let response = handler.handle_set_parameter(
            18,
            SetParameterRequest {
                correlation_id: [0u8; 16],
                name: "blocksize.base".to_string(),
                value: ParamValue::U64(2_000_000),
            },
        );
        assert!(response.success);
    }
}
