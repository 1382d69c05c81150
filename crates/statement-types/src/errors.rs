//! Error types for the statement processor.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatementError>;

#[derive(Error, Debug)]
pub enum StatementError {
	#[error("Malformed input: {0}")]
	MalformedInput(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StatementError {
	fn from(err: serde_json::Error) -> Self {
		StatementError::MalformedInput(err.to_string())
	}
}
