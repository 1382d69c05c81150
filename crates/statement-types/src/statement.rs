//! Statement line records and the violation markers derived from them.
//!
//! Records are identified by their `reference` alone. Instead of overriding
//! equality, both record types expose an explicit [`key`](StatementRecord::key)
//! that the validator uses for counting and de-duplication; the derived
//! `PartialEq` stays structural so whole results can be compared in tests.

use crate::errors::Result;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Identity key shared by statement and error records.
pub type Reference = i64;

/// One line of a customer statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementRecord {
	/// Transaction reference, expected to be unique within a batch
	pub reference: Reference,
	/// Account the line belongs to
	pub account_number: String,
	/// Balance before the mutation
	#[serde(with = "amount")]
	pub start_balance: BigDecimal,
	/// Signed amount applied to the start balance
	#[serde(with = "amount")]
	pub mutation: BigDecimal,
	/// Free-form text, ignored by every rule
	#[serde(default)]
	pub description: String,
	/// Balance after the mutation
	#[serde(with = "amount")]
	pub end_balance: BigDecimal,
}

impl StatementRecord {
	pub fn new(
		reference: Reference,
		account_number: impl Into<String>,
		start_balance: BigDecimal,
		mutation: BigDecimal,
		end_balance: BigDecimal,
	) -> Self {
		Self {
			reference,
			account_number: account_number.into(),
			start_balance,
			mutation,
			description: String::new(),
			end_balance,
		}
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	/// Identity of the record for uniqueness checks.
	pub fn key(&self) -> Reference {
		self.reference
	}

	/// Parses a JSON array of records.
	pub fn parse_batch(json: &str) -> Result<Vec<StatementRecord>> {
		Ok(serde_json::from_str(json)?)
	}

	/// Reads and parses a file holding a JSON array of records.
	pub fn parse_batch_file<P: AsRef<Path>>(path: P) -> Result<Vec<StatementRecord>> {
		let contents = std::fs::read_to_string(path.as_ref())?;
		Self::parse_batch(&contents)
	}
}

/// Serde adapter for amounts.
///
/// JSON numbers keep their literal digits (serde_json `arbitrary_precision`),
/// so amounts of any size or scale are parsed without rounding. Decimal
/// strings are accepted as well.
mod amount {
	use bigdecimal::BigDecimal;
	use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};
	use std::str::FromStr;

	pub fn serialize<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serde_json::Number::from_str(&value.to_string())
			.map_err(serde::ser::Error::custom)?
			.serialize(serializer)
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
	where
		D: Deserializer<'de>,
	{
		let literal = match serde_json::Value::deserialize(deserializer)? {
			serde_json::Value::Number(number) => number.to_string(),
			serde_json::Value::String(text) => text,
			other => {
				return Err(D::Error::custom(format!(
					"invalid amount {}, expected a decimal number",
					other
				)))
			}
		};
		BigDecimal::from_str(literal.trim())
			.map_err(|e| D::Error::custom(format!("invalid amount '{}': {}", literal, e)))
	}
}

/// A record implicated in at least one rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
	pub reference: Reference,
	pub account_number: String,
}

impl ErrorRecord {
	pub fn key(&self) -> Reference {
		self.reference
	}
}

impl From<&StatementRecord> for ErrorRecord {
	fn from(record: &StatementRecord) -> Self {
		Self {
			reference: record.reference,
			account_number: record.account_number.clone(),
		}
	}
}

impl std::fmt::Display for ErrorRecord {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"reference={} account_number={}",
			self.reference, self.account_number
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use std::str::FromStr;

	fn dec(literal: &str) -> BigDecimal {
		BigDecimal::from_str(literal).unwrap()
	}

	#[test]
	fn test_deserialize_camel_case_record() {
		let json = r#"[{
			"reference": 1,
			"accountNumber": "NL91RABO0315273637",
			"startBalance": 100,
			"mutation": -10.25,
			"description": "Coffee",
			"endBalance": 89.75
		}]"#;

		let records = StatementRecord::parse_batch(json).unwrap();
		assert_eq!(records.len(), 1);
		let record = &records[0];
		assert_eq!(record.reference, 1);
		assert_eq!(record.account_number, "NL91RABO0315273637");
		assert_eq!(record.start_balance, BigDecimal::from(100));
		assert_eq!(record.mutation, dec("-10.25"));
		assert_eq!(record.end_balance, dec("89.75"));
		assert_eq!(record.description, "Coffee");
	}

	#[test]
	fn test_decimal_parsed_without_float_rounding() {
		let json = r#"[{
			"reference": 7,
			"accountNumber": "1",
			"startBalance": 0.1,
			"mutation": 0.2,
			"endBalance": 0.3
		}]"#;

		let records = StatementRecord::parse_batch(json).unwrap();
		let record = &records[0];
		assert_eq!(&record.start_balance + &record.mutation, record.end_balance);
	}

	#[test]
	fn test_decimal_accepts_strings() {
		let json = r#"[{
			"reference": 3,
			"accountNumber": "1",
			"startBalance": "12.50",
			"mutation": "-2.50",
			"endBalance": "10"
		}]"#;

		let records = StatementRecord::parse_batch(json).unwrap();
		assert_eq!(records[0].start_balance, dec("12.5"));
	}

	#[test]
	fn test_description_is_optional() {
		let json = r#"[{
			"reference": 1,
			"accountNumber": "123",
			"startBalance": 1,
			"mutation": 1,
			"endBalance": 2
		}]"#;

		let records = StatementRecord::parse_batch(json).unwrap();
		assert!(records[0].description.is_empty());
	}

	#[test]
	fn test_missing_balance_is_malformed() {
		let json = r#"[{
			"reference": 1,
			"accountNumber": "123",
			"startBalance": 1,
			"mutation": 1
		}]"#;

		let err = StatementRecord::parse_batch(json).unwrap_err();
		assert!(matches!(err, crate::StatementError::MalformedInput(_)));
		assert!(err.to_string().contains("endBalance"));
	}

	#[test]
	fn test_amount_beyond_28_fraction_digits_kept_exactly() {
		let json = r#"[{
			"reference": 1,
			"accountNumber": "123",
			"startBalance": 0.00000000000000000000000000001,
			"mutation": 0,
			"endBalance": 0
		}]"#;

		let records = StatementRecord::parse_batch(json).unwrap();
		assert_eq!(records[0].start_balance, dec("1E-29"));
		assert_ne!(records[0].start_balance, BigDecimal::from(0));
	}

	#[test]
	fn test_amount_above_1e29_parsed() {
		let json = r#"[{
			"reference": 1,
			"accountNumber": "123",
			"startBalance": 100000000000000000000000000000000,
			"mutation": 0,
			"endBalance": 100000000000000000000000000000000
		}]"#;

		let records = StatementRecord::parse_batch(json).unwrap();
		assert_eq!(records[0].start_balance, dec("1E32"));
		assert_eq!(records[0].start_balance, records[0].end_balance);
	}

	#[test]
	fn test_non_numeric_amount_is_malformed() {
		let json = r#"[{
			"reference": 1,
			"accountNumber": "123",
			"startBalance": true,
			"mutation": "ten",
			"endBalance": 1
		}]"#;

		let err = StatementRecord::parse_batch(json).unwrap_err();
		assert!(matches!(err, crate::StatementError::MalformedInput(_)));
	}

	#[test]
	fn test_parse_batch_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			r#"[{{"reference": 2, "accountNumber": "9", "startBalance": 1, "mutation": 1, "endBalance": 2}}]"#
		)
		.unwrap();

		let records = StatementRecord::parse_batch_file(file.path()).unwrap();
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].reference, 2);
	}

	#[test]
	fn test_parse_batch_file_missing_is_io_error() {
		let err = StatementRecord::parse_batch_file("/no/such/statements.json").unwrap_err();
		assert!(matches!(err, crate::StatementError::Io(_)));
	}

	#[test]
	fn test_object_instead_of_array_is_malformed() {
		let err = StatementRecord::parse_batch(r#"{"result":null}"#).unwrap_err();
		assert!(matches!(err, crate::StatementError::MalformedInput(_)));
	}

	#[test]
	fn test_error_record_wire_shape() {
		let record = StatementRecord::new(
			42,
			"456",
			BigDecimal::from(1),
			BigDecimal::from(1),
			BigDecimal::from(2),
		);
		let error = ErrorRecord::from(&record);

		let json = serde_json::to_value(&error).unwrap();
		assert_eq!(json, serde_json::json!({"reference": 42, "accountNumber": "456"}));
		assert_eq!(error.key(), record.key());
	}
}
