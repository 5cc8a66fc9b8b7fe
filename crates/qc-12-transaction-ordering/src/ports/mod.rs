//! Ports module for Canonical Transaction Ordering.
//!
//! Defines the inbound (API) port trait. CTOR needs no outbound
//! collaborators: ordering and activation tracking are pure, local
//! computations over data the caller already provides.

pub mod inbound;

pub use inbound::CtorApi;
