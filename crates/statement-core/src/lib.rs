//! Validation engine for customer statement batches.
//!
//! A batch is checked against two independent rules:
//!
//! - every `reference` must be unique within the batch
//! - every record must balance: `start_balance + mutation == end_balance`
//!
//! The [`StatementValidator`] runs both rules, merges their error records by
//! reference and derives one of the four [`ResultCode`]s. It holds no state
//! between calls, so a single instance can be shared freely across threads.

pub mod rules;

pub use rules::{dedup_by_reference, DuplicateReferenceRule, EndBalanceRule, StatementRule};

use statement_types::{ResultCode, StatementRecord, ValidationResult};
use tracing::{debug, instrument};

/// Classifies statement batches.
#[derive(Debug, Default, Clone)]
pub struct StatementValidator {
	duplicate_rule: DuplicateReferenceRule,
	balance_rule: EndBalanceRule,
}

impl StatementValidator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Validates a batch and returns its verdict.
	///
	/// Error records from the uniqueness rule come first, followed by those
	/// of the balance rule; a reference violating both appears once.
	#[instrument(skip_all, fields(records = records.len()))]
	pub fn validate(&self, records: &[StatementRecord]) -> ValidationResult {
		let duplicates = self.duplicate_rule.violations(records);
		let incorrect_balances = self.balance_rule.violations(records);

		let result = ResultCode::classify(!duplicates.is_empty(), !incorrect_balances.is_empty());
		let error_records = dedup_by_reference(duplicates.into_iter().chain(incorrect_balances));

		debug!(
			result = %result,
			error_records = error_records.len(),
			"Statement batch validated"
		);

		ValidationResult {
			result,
			error_records,
		}
	}
}
