//! Inbound ports (driving API) for Canonical Transaction Ordering.

use crate::domain::errors::OrderingError;
use crate::domain::value_objects::{ActivationState, Hash};

/// Primary CTOR API.
pub trait CtorApi: Send + Sync {
    /// Record whether the block at `height` signaled CTOR support, and
    /// return the activation state after this block (advances the
    /// rolling window, evaluating a transition once the window closes).
    fn record_block_signal(&self, height: u64, signals_ctor: bool) -> ActivationState;

    /// Current activation state.
    fn activation_state(&self) -> ActivationState;

    /// Canonically sort a set of transaction ids for block construction.
    /// Pure function, independent of activation state.
    fn sort_transactions(&self, coinbase: Option<Hash>, txids: Vec<Hash>) -> Vec<Hash>;

    /// Validate that a candidate block's transaction order is canonical.
    /// A no-op (`Ok`) when CTOR is not yet `Active`, or when `height` is
    /// still within the post-activation grace period.
    fn validate_block_order(&self, height: u64, txids: &[Hash]) -> Result<(), OrderingError>;
}
