//! Application module for Canonical Transaction Ordering.

pub mod service;

pub use service::CtorService;
