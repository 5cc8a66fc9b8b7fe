//! IPC module for the Parameter Registry.
//!
//! - Accept: `SetParameterRequest` from the Governance subsystem ONLY.

pub mod handler;
pub mod payloads;

pub use handler::ParameterRegistryHandler;
pub use payloads::*;
