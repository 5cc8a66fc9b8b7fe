//! Core entities for the Block-Size Governor.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Mutable governor state: the current ceiling plus the rolling window used
/// to derive the next one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockSizeState {
    pub current_limit: u64,
    pub target_size: u64,
    pub adjustment_factor: f64,
    pub emergency_mode: bool,
    pub blocks_since_adjustment: u64,
    /// Last 100 observed block sizes, most recent last.
    pub recent_sizes: VecDeque<u64>,
}

impl BlockSizeState {
    pub fn new(base_size: u64) -> Self {
        Self {
            current_limit: base_size,
            target_size: base_size,
            adjustment_factor: 1.0,
            emergency_mode: false,
            blocks_since_adjustment: 0,
            recent_sizes: VecDeque::new(),
        }
    }

    /// Records a block's serialized weight, keeping the last 100 samples.
    pub fn record_block(&mut self, size: u64) {
        self.recent_sizes.push_back(size);
        if self.recent_sizes.len() > 100 {
            self.recent_sizes.pop_front();
        }
        self.blocks_since_adjustment += 1;
    }
}

/// A miner-encoded size preference from the coinbase transaction.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MinerVote {
    pub preferred_size: u64,
    pub max_size: u64,
    pub timestamp: u64,
}

/// Observed statistics over the current sampling window.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BlockSizeStats {
    pub average_size: u64,
    pub median_size: u64,
    pub max_size: u64,
    pub min_size: u64,
    pub utilization_rate: f64,
    pub blocks_at_capacity: usize,
}
