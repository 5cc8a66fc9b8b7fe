//! Error types for the Block-Size Governor.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernorError {
    #[error("block size {size} exceeds current limit {limit}")]
    SizeOverLimit { size: u64, limit: u64 },

    #[error("invalid transition: new/old ratio {ratio} outside [{min}, {max}]")]
    InvalidTransition { ratio: f64, min: f64, max: f64 },

    #[error("invalid miner vote: {reason}")]
    InvalidVote { reason: String },
}
