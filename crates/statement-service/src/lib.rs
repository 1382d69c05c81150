//! HTTP service and command-line entry point for the customer statement
//! processor.
//!
//! # Components
//!
//! - `api`: axum router, handlers and the mapping of failures to responses
//! - `cli`: command-line arguments
//! - `service`: server lifecycle, tracing setup and offline batch checks

pub mod api;
pub mod cli;
pub mod service;
