//! Canonical Transaction Ordering service.
//!
//! Activation tracking lives behind a single serializing mutex, matching
//! the per-subsystem locking discipline used across the workspace's
//! stateful controllers. Sorting and order validation are pure and take
//! no lock beyond reading the current activation state.

use crate::algorithms::{activation, ctor_sort};
use crate::config::CtorConfig;
use crate::domain::entities::ActivationWindow;
use crate::domain::errors::OrderingError;
use crate::domain::invariants::check_canonical_order;
use crate::domain::value_objects::{ActivationState, Hash};
use crate::ports::inbound::CtorApi;
use parking_lot::Mutex;
use tracing::info;

struct CtorState {
    activation: ActivationState,
    window: ActivationWindow,
    activated_at_height: Option<u64>,
    /// Windows evaluated since `Started` was entered, without reaching
    /// `LockedIn`. Reset whenever the state leaves `Started`.
    periods_in_started: u64,
}

pub struct CtorService {
    config: CtorConfig,
    state: Mutex<CtorState>,
}

impl CtorService {
    pub fn new(config: CtorConfig) -> Self {
        Self {
            config,
            state: Mutex::new(CtorState {
                activation: ActivationState::Defined,
                window: ActivationWindow::new(0),
                activated_at_height: None,
                periods_in_started: 0,
            }),
        }
    }
}

impl Default for CtorService {
    fn default() -> Self {
        Self::new(CtorConfig::default())
    }
}

impl CtorApi for CtorService {
    fn record_block_signal(&self, height: u64, signals_ctor: bool) -> ActivationState {
        let mut state = self.state.lock();

        if state.activation.is_terminal() && state.activation == ActivationState::Failed {
            return state.activation;
        }

        state.window.record(signals_ctor);

        if state.window.is_complete(self.config.period) {
            if state.activation == ActivationState::Started {
                state.periods_in_started += 1;
            }
            let next = activation::transition(
                state.activation,
                &state.window,
                &self.config,
                state.periods_in_started,
            );
            if next != state.activation {
                info!(height, ?next, "CTOR activation state transitioned");
            }
            if next == ActivationState::Active && state.activation != ActivationState::Active {
                state.activated_at_height = Some(height);
            }
            if next != ActivationState::Started {
                state.periods_in_started = 0;
            }
            state.activation = next;
            state.window = ActivationWindow::new(height + 1);
        }

        state.activation
    }

    fn activation_state(&self) -> ActivationState {
        self.state.lock().activation
    }

    fn sort_transactions(&self, coinbase: Option<Hash>, txids: Vec<Hash>) -> Vec<Hash> {
        ctor_sort::sort_transactions(coinbase, txids)
    }

    fn validate_block_order(&self, height: u64, txids: &[Hash]) -> Result<(), OrderingError> {
        if txids.is_empty() {
            return Err(OrderingError::EmptyBatch);
        }

        let state = self.state.lock();
        if !state.activation.is_active() {
            return Ok(());
        }
        if let Some(activated_at) = state.activated_at_height {
            if height < activated_at + self.config.grace_period {
                return Ok(());
            }
        }
        drop(state);

        let violations = check_canonical_order(txids);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(OrderingError::InvalidOrdering { violations })
        }
    }
}
