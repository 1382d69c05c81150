//! Batch verdicts produced by the validator.

use crate::statement::ErrorRecord;
use serde::{Deserialize, Serialize};

/// Classification of a validated batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
	Success,
	DuplicateReference,
	IncorrectEndBalance,
	DuplicateReferenceIncorrectEndBalance,
}

impl ResultCode {
	/// Derives the code from which rules reported violations.
	pub fn classify(has_duplicate_violation: bool, has_balance_violation: bool) -> Self {
		match (has_duplicate_violation, has_balance_violation) {
			(false, false) => ResultCode::Success,
			(true, false) => ResultCode::DuplicateReference,
			(false, true) => ResultCode::IncorrectEndBalance,
			(true, true) => ResultCode::DuplicateReferenceIncorrectEndBalance,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			ResultCode::Success => "SUCCESS",
			ResultCode::DuplicateReference => "DUPLICATE_REFERENCE",
			ResultCode::IncorrectEndBalance => "INCORRECT_END_BALANCE",
			ResultCode::DuplicateReferenceIncorrectEndBalance => {
				"DUPLICATE_REFERENCE_INCORRECT_END_BALANCE"
			}
		}
	}

	pub fn is_success(&self) -> bool {
		matches!(self, ResultCode::Success)
	}
}

impl std::fmt::Display for ResultCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Verdict for one batch: the classification plus every implicated record,
/// unique by reference in first-encountered order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
	pub result: ResultCode,
	pub error_records: Vec<ErrorRecord>,
}

impl ValidationResult {
	pub fn success() -> Self {
		Self {
			result: ResultCode::Success,
			error_records: Vec::new(),
		}
	}
}
