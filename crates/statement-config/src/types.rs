//! Configuration types for the statement processor.

use serde::{Deserialize, Serialize};

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
	/// HTTP listener and identity
	pub service: ServiceSettings,
	/// API behaviour
	pub api: ApiConfig,
	/// Logging output
	pub logging: LoggingConfig,
}

/// Service identity and listener settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceSettings {
	/// Service name reported by the health endpoint
	pub name: String,
	/// Bind address
	pub host: String,
	/// Bind port
	pub port: u16,
	/// Maximum accepted request body in bytes
	pub max_request_size: usize,
}

impl Default for ServiceSettings {
	fn default() -> Self {
		Self {
			name: "customer-statement-processor".to_string(),
			host: "0.0.0.0".to_string(),
			port: 8080,
			max_request_size: 1024 * 1024,
		}
	}
}

impl ServiceSettings {
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}
}

/// API configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
	/// Allow any origin, method and header
	pub cors_permissive: bool,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			cors_permissive: true,
		}
	}
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
	/// Default filter level, overridden by `RUST_LOG`
	pub level: String,
	/// Output format
	pub format: LogFormat,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Pretty,
	Json,
}

impl std::str::FromStr for LogFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"pretty" => Ok(LogFormat::Pretty),
			"json" => Ok(LogFormat::Json),
			other => Err(format!("Unknown log format: {}", other)),
		}
	}
}
