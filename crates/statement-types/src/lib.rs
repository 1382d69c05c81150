//! Shared types for the customer statement processor.
//!
//! The data model consumed and produced by the validator lives here, together
//! with the JSON envelopes used at the HTTP boundary and the crate-wide error
//! type.

pub mod api;
pub mod errors;
pub mod result;
pub mod statement;

pub use api::*;
pub use errors::*;
pub use result::*;
pub use statement::*;
