//! Error types for Canonical Transaction Ordering.

use super::entities::OrderingViolation;
use thiserror::Error;

/// All errors that can occur in transaction ordering.
#[derive(Debug, Error)]
pub enum OrderingError {
    /// The block's transactions are not in canonical (lexicographic txid)
    /// order, outside the post-activation grace period.
    #[error("invalid transaction ordering: {violations:?}")]
    InvalidOrdering { violations: Vec<OrderingViolation> },

    /// CTOR enforcement was requested at a height where it is not active.
    #[error("CTOR is not active at this height")]
    NotActive,

    /// A block (or mempool snapshot) with no transactions was submitted
    /// for ordering or validation.
    #[error("empty transaction batch")]
    EmptyBatch,

    /// Unauthorized sender (IPC security boundary violation).
    #[error("unauthorized sender: expected Consensus (8), got {sender_id}")]
    UnauthorizedSender { sender_id: u8 },

    /// Message timestamp out of bounds.
    #[error("stale message rejected")]
    StaleMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_sender_error() {
        let err = OrderingError::UnauthorizedSender { sender_id: 5 };
        assert_eq!(
            err.to_string(),
            "unauthorized sender: expected Consensus (8), got 5"
        );
    }

    #[test]
    fn test_not_active_error() {
        let err = OrderingError::NotActive;
        assert_eq!(err.to_string(), "CTOR is not active at this height");
    }
}
