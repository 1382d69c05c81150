//! Configuration loading from files and environment.

use crate::types::*;
use crate::ConfigError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
	file_path: Option<PathBuf>,
	env_prefix: String,
}

impl Default for ConfigLoader {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "STATEMENT_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_path_buf());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	/// Loads the file (or defaults when no file is set), applies environment
	/// overrides and validates the result.
	pub fn load(&self) -> Result<ServiceConfig, ConfigError> {
		self.load_with(|name| std::env::var(name).ok())
	}

	/// Like [`load`](Self::load) but resolves overrides through `lookup`.
	pub fn load_with<F>(&self, lookup: F) -> Result<ServiceConfig, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut config = match &self.file_path {
			Some(path) => Self::from_file(path)?,
			None => {
				debug!("No configuration file given, using defaults");
				ServiceConfig::default()
			}
		};

		self.apply_overrides(&mut config, lookup)?;
		validate_config(&config)?;
		Ok(config)
	}

	/// Load configuration from file, picking the parser by extension
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ServiceConfig, ConfigError> {
		let path = path.as_ref();
		info!("Loading configuration from {:?}", path);

		if !path.exists() {
			return Err(ConfigError::FileNotFound(path.display().to_string()));
		}
		let contents = std::fs::read_to_string(path)?;

		match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Self::from_toml(&contents),
			Some("json") => Self::from_json(&contents),
			Some("yaml") | Some("yml") => Self::from_yaml(&contents),
			_ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
		}
	}

	/// Load from TOML string
	pub fn from_toml(contents: &str) -> Result<ServiceConfig, ConfigError> {
		toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
	}

	/// Load from JSON string
	pub fn from_json(contents: &str) -> Result<ServiceConfig, ConfigError> {
		serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
	}

	/// Load from YAML string
	pub fn from_yaml(contents: &str) -> Result<ServiceConfig, ConfigError> {
		serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
	}

	fn apply_overrides<F>(&self, config: &mut ServiceConfig, lookup: F) -> Result<(), ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |suffix: &str| lookup(&format!("{}{}", self.env_prefix, suffix));

		if let Some(host) = var("HOST") {
			debug!("Overriding host from environment");
			config.service.host = host;
		}

		if let Some(port) = var("PORT") {
			config.service.port = port
				.parse()
				.map_err(|e| ConfigError::Validation(format!("Invalid port: {}", e)))?;
		}

		if let Some(size) = var("MAX_REQUEST_SIZE") {
			config.service.max_request_size = size.parse().map_err(|e| {
				ConfigError::Validation(format!("Invalid max request size: {}", e))
			})?;
		}

		if let Some(level) = var("LOG_LEVEL") {
			config.logging.level = level;
		}

		if let Some(format) = var("LOG_FORMAT") {
			config.logging.format = format.parse().map_err(ConfigError::Validation)?;
		}

		Ok(())
	}
}

/// Validate configuration
pub fn validate_config(config: &ServiceConfig) -> Result<(), ConfigError> {
	if config.service.name.trim().is_empty() {
		return Err(ConfigError::Validation(
			"Service name must not be empty".to_string(),
		));
	}

	if config.service.host.trim().is_empty() {
		return Err(ConfigError::Validation("Host must not be empty".to_string()));
	}

	if config.service.port == 0 {
		return Err(ConfigError::Validation("Port must not be 0".to_string()));
	}

	if config.service.max_request_size == 0 {
		return Err(ConfigError::Validation(
			"Max request size must be greater than 0".to_string(),
		));
	}

	let level = config.logging.level.to_ascii_lowercase();
	if !LOG_LEVELS.contains(&level.as_str()) {
		return Err(ConfigError::Validation(format!(
			"Unknown log level '{}', expected one of {:?}",
			config.logging.level, LOG_LEVELS
		)));
	}

	Ok(())
}
