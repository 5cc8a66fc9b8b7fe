//! IPC payloads for Canonical Transaction Ordering.
//!
//! ## Security (envelope-only identity)
//!
//! Payloads carry no sender identity fields; identity is derived solely
//! from the `AuthenticatedMessage` envelope.

use serde::{Deserialize, Serialize};

/// Request to validate a candidate block's transaction ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOrderRequest {
    pub correlation_id: [u8; 16],
    pub height: u64,
    /// Transaction ids in block order, coinbase at position 0.
    pub txids: Vec<[u8; 32]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOrderResponse {
    pub correlation_id: [u8; 16],
    pub valid: bool,
    pub error: Option<String>,
}

/// Request to canonically sort a set of transaction ids for a block
/// template. `coinbase` is carried separately so it is never subject to
/// sorting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortTransactionsRequest {
    pub correlation_id: [u8; 16],
    pub coinbase: Option<[u8; 32]>,
    pub txids: Vec<[u8; 32]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortTransactionsResponse {
    pub correlation_id: [u8; 16],
    pub ordered_txids: Vec<[u8; 32]>,
}

/// Notification that a block was accepted at `height`, carrying whether
/// it signaled CTOR support (BIP9 version bit).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockSignalNotification {
    pub correlation_id: [u8; 16],
    pub height: u64,
    pub signals_ctor: bool,
}
