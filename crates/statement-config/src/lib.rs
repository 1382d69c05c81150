//! Configuration for the statement processor service.
//!
//! Settings are read from a TOML, JSON or YAML file, then overridden by
//! `STATEMENT_*` environment variables and validated.

pub mod loader;
pub mod types;

pub use loader::{validate_config, ConfigLoader};
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("Unsupported config format: {0}")]
	UnsupportedFormat(String),

	#[error("Validation error: {0}")]
	Validation(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}
