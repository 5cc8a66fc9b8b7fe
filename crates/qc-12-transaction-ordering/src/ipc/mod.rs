//! IPC module for Canonical Transaction Ordering.
//!
//! - Accept: ordering requests from Consensus ONLY.

pub mod handler;
pub mod payloads;

pub use handler::CtorHandler;
pub use payloads::*;
