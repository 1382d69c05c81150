//! Envelopes for the statement processor HTTP API.
//!
//! Successful calls answer with a [`ValidationResult`](crate::ValidationResult)
//! as-is. Failures at the boundary reuse the same shape with a failure code
//! and no error records.

use crate::statement::ErrorRecord;
use serde::{Deserialize, Serialize};

/// Outcome codes reported when a request never reaches the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureCode {
	/// The payload could not be read as a list of statement records
	BadRequest,
	/// Anything else that went wrong while handling the request
	InternalServerError,
}

/// API failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureResponse {
	pub result: FailureCode,
	pub error_records: Vec<ErrorRecord>,
}

impl FailureResponse {
	pub fn new(result: FailureCode) -> Self {
		Self {
			result,
			error_records: Vec::new(),
		}
	}
}

/// Liveness probe payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
	pub status: String,
	pub service: String,
	pub version: String,
	pub timestamp: i64,
}
