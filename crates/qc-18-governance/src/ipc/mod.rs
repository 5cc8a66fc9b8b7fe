//! IPC module for the Governance Engine.
//!
//! - Accept: proposal/vote/tally/execute requests from Consensus ONLY.

pub mod handler;
pub mod payloads;

pub use handler::GovernanceHandler;
pub use payloads::*;
