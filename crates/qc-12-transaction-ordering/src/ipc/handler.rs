//! IPC handler for Canonical Transaction Ordering.
//!
//! ## Security Boundaries
//!
//! - MUST validate `sender_id == AUTHORIZED_SENDER` (Consensus).

use crate::application::service::CtorService;
use crate::domain::value_objects::Hash;
use crate::ipc::payloads::{
    BlockSignalNotification, SortTransactionsRequest, SortTransactionsResponse,
    ValidateOrderRequest, ValidateOrderResponse,
};
use crate::ports::inbound::CtorApi;
use tracing::{info, warn};

const AUTHORIZED_SENDER: u8 = 8;

pub struct CtorHandler {
    service: CtorService,
}

impl CtorHandler {
    pub fn new(service: CtorService) -> Self {
        Self { service }
    }

    pub fn handle_validate_order(
        &self,
        sender_id: u8,
        request: ValidateOrderRequest,
    ) -> ValidateOrderResponse {
        if sender_id != AUTHORIZED_SENDER {
            warn!(sender_id, "unauthorized ValidateOrderRequest rejected");
            return ValidateOrderResponse {
                correlation_id: request.correlation_id,
                valid: false,
                error: Some(format!(
                    "unauthorized sender: expected {AUTHORIZED_SENDER}, got {sender_id}"
                )),
            };
        }

        let txids: Vec<Hash> = request.txids.iter().map(|h| Hash::from(*h)).collect();
        match self.service.validate_block_order(request.height, &txids) {
            Ok(()) => ValidateOrderResponse {
                correlation_id: request.correlation_id,
                valid: true,
                error: None,
            },
            Err(e) => ValidateOrderResponse {
                correlation_id: request.correlation_id,
                valid: false,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn handle_sort_transactions(
        &self,
        sender_id: u8,
        request: SortTransactionsRequest,
    ) -> SortTransactionsResponse {
        if sender_id != AUTHORIZED_SENDER {
            warn!(sender_id, "unauthorized SortTransactionsRequest rejected");
            return SortTransactionsResponse {
                correlation_id: request.correlation_id,
                ordered_txids: vec![],
            };
        }

        let coinbase = request.coinbase.map(Hash::from);
        let rest: Vec<Hash> = request.txids.iter().map(|h| Hash::from(*h)).collect();
        let ordered = self.service.sort_transactions(coinbase, rest);

        SortTransactionsResponse {
            correlation_id: request.correlation_id,
            ordered_txids: ordered.into_iter().map(|h| h.0).collect(),
        }
    }

    pub fn handle_block_signal(
        &self,
        sender_id: u8,
        notification: BlockSignalNotification,
    ) -> bool {
        if sender_id != AUTHORIZED_SENDER {
            warn!(sender_id, "unauthorized BlockSignalNotification rejected");
            return false;
        }
        let state = self
            .service
            .record_block_signal(notification.height, notification.signals_ctor);
        info!(height = notification.height, ?state, "CTOR signal recorded");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CtorConfig;

    fn make_handler() -> CtorHandler {
        CtorHandler::new(CtorService::new(CtorConfig::for_testing()))
    }

    #[test]
    fn test_reject_unauthorized_sender() {
        let handler = make_handler();
        let response = handler.handle_validate_order(
            3,
            ValidateOrderRequest {
                correlation_id: [0u8; 16],
                height: 0,
                txids: vec![[1u8; 32]],
            },
        );
        assert!(!response.valid);
    }

    #[test]
    fn test_accept_authorized_sender() {
        let handler = make_handler();
        let response = handler.handle_validate_order(
            8,
            ValidateOrderRequest {
                correlation_id: [0u8; 16],
                height: 0,
                txids: vec![[1u8; 32]],
            },
        );
        assert!(response.valid);
    }

    #[test]
    fn test_sort_transactions_roundtrip() {
        let handler = make_handler();
        let response = handler.handle_sort_transactions(
            8,
            SortTransactionsRequest {
                correlation_id: [0u8; 16],
                coinbase: Some([255u8; 32]),
                txids: vec![[3u8; 32], [1u8; 32], [2u8; 32]],
            },
        );
        assert_eq!(response.ordered_txids[0], [255u8; 32]);
        assert_eq!(response.ordered_txids[1], [1u8; 32]);
    }
}
