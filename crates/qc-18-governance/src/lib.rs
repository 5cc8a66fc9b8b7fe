//! # QC-18: On-Chain Governance Engine
//!
//! Stake-weighted proposal lifecycle: creation, voting, tallying, and
//! delayed execution, with the executed effect published as an
//! `ExecutionDirective` for the rest of the system to apply.
//!
//! ## Architecture
//!
//! - **Domain**: `GovernanceProposal`, vote tallies, `ExecutionDirective`
//! - **Algorithms**: participation/approval tallying
//! - **Ports**: Inbound (GovernanceApi)
//! - **Application**: `GovernanceEngine` orchestration
//! - **IPC**: Handler for inter-subsystem communication

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ipc;
pub mod ports;

pub use application::service::GovernanceEngine;
pub use config::GovernanceConfig;
pub use domain::entities::*;
pub use domain::errors::GovernanceError;
pub use domain::value_objects::*;
pub use ipc::{GovernanceHandler, CreateProposalRequest, CreateProposalResponse};
pub use ports::inbound::GovernanceApi;
