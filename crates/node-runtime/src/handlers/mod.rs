//! # Event Handlers
//!
//! Message handlers for each subsystem that process choreography events.

pub mod api_query;
pub mod choreography;

pub use api_query::ApiQueryHandler;
pub use choreography::*;
