//! BIP9-style activation state transition for CTOR.

use crate::config::CtorConfig;
use crate::domain::entities::ActivationWindow;
use crate::domain::value_objects::ActivationState;

/// Evaluate the next activation state given the just-completed window.
///
/// Called once per `period` blocks, after `window.is_complete(period)`.
/// `Defined` always advances to `Started` the first time it is
/// evaluated: deployments begin signaling immediately rather than
/// waiting on a wall-clock start time, since this crate has no notion
/// of block timestamps of its own.
///
/// `periods_in_started` counts the windows (including this one) that
/// have been evaluated since `Started` was entered; once it exceeds
/// `config.timeout_periods` without reaching `LockedIn`, the deployment
/// gives up rather than signaling forever.
pub fn transition(
    current: ActivationState,
    window: &ActivationWindow,
    config: &CtorConfig,
    periods_in_started: u64,
) -> ActivationState {
    match current {
        ActivationState::Defined => ActivationState::Started,
        ActivationState::Started => {
            if window.meets_threshold(config.threshold_numerator, config.threshold_denominator) {
                ActivationState::LockedIn
            } else if periods_in_started >= config.timeout_periods {
                ActivationState::Failed
            } else {
                ActivationState::Started
            }
        }
        // One full period of grace after lock-in, then activation is
        // unconditional per BIP9.
        ActivationState::LockedIn => ActivationState::Active,
        ActivationState::Active => ActivationState::Active,
        ActivationState::Failed => ActivationState::Failed,
    }
}
