//! # QC-19: Block-Size Governor
//!
//! Computes the block-size ceiling enforced at each height from observed
//! demand and miner-vote signals. Enables "unbounded" blocks within
//! disciplined, periodically re-derived bounds.
//!
//! ## Architecture
//!
//! - **Domain**: `BlockSizeState`, `MinerVote`, `BlockSizeStats`, `GovernorError`
//! - **Application**: `BlockSizeGovernor` (the stateful controller)
//! - **Ports**: Inbound (`BlockSizeGovernorApi`)
//! - **IPC**: Handler for Consensus-originated validation queries

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ipc;
pub mod ports;

pub use application::service::BlockSizeGovernor;
pub use config::GovernorConfig;
pub use domain::entities::*;
pub use domain::errors::GovernorError;
pub use ports::inbound::BlockSizeGovernorApi;
