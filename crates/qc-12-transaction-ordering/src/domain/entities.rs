//! Core entities for Canonical Transaction Ordering.

use super::value_objects::Hash;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Tracks BIP9-style signaling over the current `period`-block window.
///
/// `period_start_height` marks the first height counted in this window;
/// the window is considered complete once `blocks_seen` reaches the
/// configured period, at which point the owning service evaluates a
/// state transition and starts a fresh window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationWindow {
    pub period_start_height: u64,
    pub blocks_seen: u64,
    pub signaling_blocks: u64,
}

impl ActivationWindow {
    pub fn new(period_start_height: u64) -> Self {
        Self {
            period_start_height,
            blocks_seen: 0,
            signaling_blocks: 0,
        }
    }

    pub fn record(&mut self, signals: bool) {
        self.blocks_seen += 1;
        if signals {
            self.signaling_blocks += 1;
        }
    }

    pub fn is_complete(&self, period: u64) -> bool {
        self.blocks_seen >= period
    }

    /// Whether `signaling_blocks / blocks_seen` meets the configured
    /// `numerator / denominator` threshold. Cross-multiplied to avoid
    /// floating point.
    pub fn meets_threshold(&self, threshold_numerator: u64, threshold_denominator: u64) -> bool {
        self.signaling_blocks * threshold_denominator >= threshold_numerator * self.blocks_seen
    }
}

/// A single CTOR ordering violation found while validating a block's
/// transaction list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingViolation {
    pub position: usize,
    pub previous_txid: Hash,
    pub current_txid: Hash,
}

/// Bounded record of recently evaluated blocks, used only for
/// observability (e.g. reporting the current signaling ratio).
#[derive(Clone, Debug, Default)]
pub struct RecentSignals {
    pub samples: VecDeque<bool>,
}

impl RecentSignals {
    const MAX_SAMPLES: usize = 2016;

    pub fn push(&mut self, signals: bool) {
        self.samples.push_back(signals);
        if self.samples.len() > Self::MAX_SAMPLES {
            self.samples.pop_front();
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let signaling = self.samples.iter().filter(|s| **s).count();
        signaling as f64 / self.samples.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_threshold_met() {
        let mut window = ActivationWindow::new(0);
        for _ in 0..1916 {
            window.record(true);
        }
        for _ in 0..100 {
            window.record(false);
        }
        assert!(window.is_complete(2016));
        assert!(window.meets_threshold(1916, 2016));
    }

    #[test]
    fn test_window_threshold_not_met() {
        let mut window = ActivationWindow::new(0);
        for _ in 0..1000 {
            window.record(true);
        }
        for _ in 0..1016 {
            window.record(false);
        }
        assert!(window.is_complete(2016));
        assert!(!window.meets_threshold(1916, 2016));
    }

    #[test]
    fn test_recent_signals_ratio() {
        let mut recent = RecentSignals::default();
        recent.push(true);
        recent.push(true);
        recent.push(false);
        recent.push(false);
        assert_eq!(recent.ratio(), 0.5);
    }
}
