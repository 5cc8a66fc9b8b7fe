//! Application module for the Governance Engine.

pub mod service;

pub use service::GovernanceEngine;
