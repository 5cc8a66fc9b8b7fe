//! Ports module for the Governance Engine.

pub mod inbound;

pub use inbound::GovernanceApi;
