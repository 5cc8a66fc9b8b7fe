//! Value objects for Canonical Transaction Ordering (CTOR).

use primitive_types::H256;
use serde::{Deserialize, Serialize};

/// Transaction id. CTOR orders purely on this value.
pub type Hash = H256;

/// BIP9-style activation state of the CTOR deployment, tracked over a
/// rolling window of `period` blocks (see `CtorConfig`).
///
/// `Active` and `Failed` are terminal: once reached the state never
/// changes again for this deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationState {
    Defined,
    Started,
    LockedIn,
    Active,
    Failed,
}

impl ActivationState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ActivationState::Active | ActivationState::Failed)
    }

    pub fn is_active(self) -> bool {
        matches!(self, ActivationState::Active)
    }
}

impl Default for ActivationState {
    fn default() -> Self {
        ActivationState::Defined
    }
}
