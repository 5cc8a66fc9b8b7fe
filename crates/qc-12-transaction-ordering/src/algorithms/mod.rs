//! Algorithms module for Canonical Transaction Ordering.
//!
//! Contains:
//! - BIP9-style activation state transition
//! - Canonical ordering sort

pub mod activation;
pub mod ctor_sort;

pub use activation::transition;
pub use ctor_sort::sort_transactions;
