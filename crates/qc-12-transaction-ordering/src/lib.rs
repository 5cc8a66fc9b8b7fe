//! # QC-12: Canonical Transaction Ordering (CTOR)
//!
//! Sorts block transactions by lexicographic txid, removing the need
//! for miners to coordinate transaction ordering, and governs the
//! BIP9-style activation of ordering enforcement.
//!
//! ## Architecture
//!
//! - **Domain**: Core entities (ActivationWindow, OrderingViolation) and
//!   the `ActivationState` value object
//! - **Algorithms**: canonical sort, BIP9-style activation transitions
//! - **Ports**: Inbound (CtorApi)
//! - **Application**: Service orchestration
//! - **IPC**: Handler for inter-subsystem communication

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ipc;
pub mod ports;

pub use application::service::CtorService;
pub use config::CtorConfig;
pub use domain::entities::*;
pub use domain::errors::OrderingError;
pub use domain::value_objects::*;
pub use ipc::{CtorHandler, ValidateOrderRequest, ValidateOrderResponse};
pub use ports::inbound::CtorApi;
