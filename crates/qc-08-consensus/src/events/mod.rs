//! Events layer (EDA)
//!
//! Reference: SPEC-08-CONSENSUS.md Section 4

mod consumed;
mod published;

pub use consumed::*;
pub use published::*;
