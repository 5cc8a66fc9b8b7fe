//! Per-tier fee-rate estimation.
//!
//! Estimates are derived from the fee-rate distribution of transactions
//! currently sitting in each priority bucket, rather than from a rolling
//! window of confirmed blocks: this crate doesn't see confirmations, only
//! admission and eviction. Confidence grows with sample size so callers
//! can tell a median backed by one transaction from one backed by
//! hundreds.

use super::entities::{FeeEstimation, MempoolTransaction, Timestamp};
use super::value_objects::Priority;

/// Sample count past which confidence saturates at 1.0.
const CONFIDENCE_SATURATION_SAMPLES: usize = 20;

/// Recomputes a `FeeEstimation` from the pool's current contents.
pub fn estimate<'a>(
    transactions: impl IntoIterator<Item = &'a MempoolTransaction>,
    now: Timestamp,
) -> FeeEstimation {
    let mut buckets: [Vec<u64>; 5] = Default::default();
    for tx in transactions {
        buckets[tx.priority().index()].push(tx.fee_rate());
    }

    let mut estimation = FeeEstimation::empty(now);
    for (i, rates) in buckets.iter_mut().enumerate() {
        if rates.is_empty() {
            continue;
        }
        rates.sort_unstable();
        estimation.fee_rate[i] = median(rates);
        estimation.confidence[i] =
            (rates.len() as f64 / CONFIDENCE_SATURATION_SAMPLES as f64).min(1.0);
    }
    estimation
}

fn median(sorted: &[u64]) -> u64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2
    } else {
        sorted[mid]
    }
}
