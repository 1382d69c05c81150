//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "statement-processor")]
#[command(about = "Customer Statement Processor", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
	/// Path to configuration file (TOML, JSON or YAML)
	#[arg(short, long, value_name = "FILE", env = "STATEMENT_CONFIG")]
	pub config: Option<PathBuf>,

	/// Log level override (trace, debug, info, warn, error)
	#[arg(short, long)]
	pub log_level: Option<String>,

	/// Subcommand to execute
	#[command(subcommand)]
	pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
	/// Start the HTTP service
	Serve,

	/// Validate a configuration file
	ValidateConfig {
		/// Configuration file to validate
		config: PathBuf,
	},

	/// Validate a JSON file of statement records and print the verdict
	Check {
		/// File holding a JSON array of statement records
		file: PathBuf,

		/// Exit with an error unless the batch is classified SUCCESS
		#[arg(long)]
		fail_on_violation: bool,
	},
}
