//! # QC-00: Parameter Registry
//!
//! Typed, atomic, process-wide configuration store. The Governance Engine
//! is the sole runtime mutator; every other subsystem reads through the
//! snapshot-publish API so a multi-key change is never observed half-applied.
//!
//! ## Architecture
//!
//! - **Domain**: `ParamValue`, `ParamSchema`, `Snapshot`
//! - **Ports**: Inbound (`ParameterRegistryApi`)
//! - **Application**: `ParameterRegistryService` (lock-free reads, serial-mutex writes)
//! - **IPC**: Handler for governance-originated parameter changes

pub mod application;
pub mod config;
pub mod domain;
pub mod ipc;
pub mod ports;

pub use application::service::ParameterRegistryService;
pub use config::defaults;
pub use domain::entities::*;
pub use domain::errors::RegistryError;
pub use ipc::{ParameterRegistryHandler, SetParameterRequest, SetParameterResponse};
pub use ports::inbound::ParameterRegistryApi;
