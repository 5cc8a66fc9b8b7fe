//! IPC module for the Block-Size Governor.
//!
//! - Accept: `ValidateBlockSizeRequest` from Consensus ONLY.

pub mod handler;
pub mod payloads;

pub use handler::BlockSizeGovernorHandler;
pub use payloads::*;
