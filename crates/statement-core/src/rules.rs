//! Correctness rules applied to a batch of statement records.

use statement_types::{ErrorRecord, Reference, StatementRecord};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// A check that flags the records of a batch violating it.
pub trait StatementRule: Send + Sync {
	/// Short name used in diagnostics.
	fn name(&self) -> &'static str;

	/// Returns one error record per violating reference, in first-encountered
	/// order. The first violating record of a reference supplies the account
	/// number.
	fn violations(&self, records: &[StatementRecord]) -> Vec<ErrorRecord>;
}

/// Flags every record whose reference occurs more than once in the batch.
#[derive(Debug, Default, Clone, Copy)]
pub struct DuplicateReferenceRule;

impl StatementRule for DuplicateReferenceRule {
	fn name(&self) -> &'static str {
		"duplicate_reference"
	}

	fn violations(&self, records: &[StatementRecord]) -> Vec<ErrorRecord> {
		let mut occurrences: HashMap<Reference, usize> = HashMap::new();
		for record in records {
			*occurrences.entry(record.key()).or_default() += 1;
		}

		let violations = dedup_by_reference(
			records
				.iter()
				.filter(|record| occurrences.get(&record.key()).copied().unwrap_or(0) > 1)
				.map(ErrorRecord::from),
		);
		log_violations(self.name(), &violations);
		violations
	}
}

/// Flags every record where `start_balance + mutation != end_balance`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EndBalanceRule;

impl EndBalanceRule {
	fn balances(record: &StatementRecord) -> bool {
		&record.start_balance + &record.mutation == record.end_balance
	}
}

impl StatementRule for EndBalanceRule {
	fn name(&self) -> &'static str {
		"end_balance"
	}

	fn violations(&self, records: &[StatementRecord]) -> Vec<ErrorRecord> {
		let violations = dedup_by_reference(
			records
				.iter()
				.filter(|record| !Self::balances(record))
				.map(ErrorRecord::from),
		);
		log_violations(self.name(), &violations);
		violations
	}
}

/// Keeps the first error record seen for each reference.
pub fn dedup_by_reference<I>(records: I) -> Vec<ErrorRecord>
where
	I: IntoIterator<Item = ErrorRecord>,
{
	let mut seen = HashSet::new();
	records
		.into_iter()
		.filter(|record| seen.insert(record.key()))
		.collect()
}

fn log_violations(rule: &'static str, violations: &[ErrorRecord]) {
	for violation in violations {
		warn!(
			rule,
			reference = violation.reference,
			account_number = %violation.account_number,
			"Statement record violates rule"
		);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bigdecimal::BigDecimal;
	use std::str::FromStr;

	fn record(reference: Reference, account: &str, start: &str, mutation: &str, end: &str) -> StatementRecord {
		StatementRecord::new(
			reference,
			account,
			BigDecimal::from_str(start).unwrap(),
			BigDecimal::from_str(mutation).unwrap(),
			BigDecimal::from_str(end).unwrap(),
		)
	}

	#[test]
	fn test_duplicate_rule_flags_all_occurrences_once() {
		let records = vec![
			record(1, "A", "1", "1", "2"),
			record(2, "B", "1", "1", "2"),
			record(1, "C", "1", "1", "2"),
			record(1, "D", "1", "1", "2"),
		];

		let violations = DuplicateReferenceRule.violations(&records);
		assert_eq!(
			violations,
			vec![ErrorRecord {
				reference: 1,
				account_number: "A".to_string()
			}]
		);
	}

	#[test]
	fn test_duplicate_rule_ignores_other_fields() {
		let records = vec![
			record(9, "A", "1", "1", "2").with_description("first"),
			record(9, "B", "5", "5", "99").with_description("second"),
		];

		assert_eq!(DuplicateReferenceRule.violations(&records).len(), 1);
	}

	#[test]
	fn test_duplicate_rule_unique_batch() {
		let records = vec![record(1, "A", "1", "1", "2"), record(2, "A", "1", "1", "2")];
		assert!(DuplicateReferenceRule.violations(&records).is_empty());
	}

	#[test]
	fn test_end_balance_rule_exact_comparison() {
		let records = vec![
			record(1, "A", "100", "10", "110"),
			record(2, "B", "100", "-10", "110"),
			record(3, "C", "0.1", "0.2", "0.3"),
			record(4, "D", "0.1", "0.2", "0.30000000000000004"),
		];

		let violations = EndBalanceRule.violations(&records);
		let references: Vec<Reference> = violations.iter().map(ErrorRecord::key).collect();
		assert_eq!(references, vec![2, 4]);
	}

	#[test]
	fn test_end_balance_rule_ignores_scale() {
		let records = vec![record(1, "A", "100.00", "10.0", "110")];
		assert!(EndBalanceRule.violations(&records).is_empty());
	}

	#[test]
	fn test_end_balance_rule_sees_29th_fraction_digit() {
		let records = vec![
			record(1, "A", "0.00000000000000000000000000001", "0", "0"),
			record(2, "B", "0.00000000000000000000000000001", "0.99999999999999999999999999999", "1"),
		];

		let violations = EndBalanceRule.violations(&records);
		let references: Vec<Reference> = violations.iter().map(ErrorRecord::key).collect();
		assert_eq!(references, vec![1]);
	}

	#[test]
	fn test_end_balance_rule_amounts_above_1e29() {
		let records = vec![
			record(1, "A", "100000000000000000000000000000000", "0", "100000000000000000000000000000000"),
			record(2, "B", "100000000000000000000000000000000", "1", "100000000000000000000000000000000"),
		];

		let violations = EndBalanceRule.violations(&records);
		let references: Vec<Reference> = violations.iter().map(ErrorRecord::key).collect();
		assert_eq!(references, vec![2]);
	}

	#[test]
	fn test_end_balance_rule_keeps_first_account() {
		let records = vec![
			record(5, "first", "1", "1", "3"),
			record(5, "second", "1", "1", "4"),
		];

		let violations = EndBalanceRule.violations(&records);
		assert_eq!(violations.len(), 1);
		assert_eq!(violations[0].account_number, "first");
	}

	#[test]
	fn test_dedup_preserves_order() {
		let input = vec![
			ErrorRecord {
				reference: 3,
				account_number: "x".to_string(),
			},
			ErrorRecord {
				reference: 1,
				account_number: "y".to_string(),
			},
			ErrorRecord {
				reference: 3,
				account_number: "z".to_string(),
			},
		];

		let output = dedup_by_reference(input);
		assert_eq!(output.len(), 2);
		assert_eq!(output[0].reference, 3);
		assert_eq!(output[0].account_number, "x");
		assert_eq!(output[1].reference, 1);
	}
}
