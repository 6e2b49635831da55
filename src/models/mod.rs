//! Request parameter models for the UseResponse API.
//!
//! This module contains the closed sets of filter values the API accepts
//! (ticket statuses, object types, comment ordering, ...) and the builders
//! that turn them into request parameters.

mod comments;
mod objects;
mod tickets;

pub use comments::*;
pub use objects::*;
pub use tickets::*;

/// Ordered request parameters, sent as a query string or form body.
pub type QueryParams = Vec<(String, String)>;
