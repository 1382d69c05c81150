use anyhow::{Context, Result};
use clap::Parser;
use statement_config::{ConfigLoader, ServiceConfig};
use statement_core::StatementValidator;
use statement_service::cli::{Cli, Command};
use statement_service::service::{self, StatementService};
use std::path::Path;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Some(Command::Serve) | None => {
			let config = load_config(cli.config.as_deref(), cli.log_level)?;
			service::setup_tracing(&config.logging)?;
			start_service(config).await
		}
		Some(Command::ValidateConfig { ref config }) => {
			let config = load_config(Some(config.as_path()), cli.log_level)?;
			service::setup_tracing(&config.logging)?;
			validate_config(&config);
			Ok(())
		}
		Some(Command::Check {
			ref file,
			fail_on_violation,
		}) => {
			let config = load_config(cli.config.as_deref(), cli.log_level)?;
			service::setup_tracing(&config.logging)?;
			check_statements(file, fail_on_violation)
		}
	}
}

fn load_config(path: Option<&Path>, log_level: Option<String>) -> Result<ServiceConfig> {
	let loader = match path {
		Some(path) => ConfigLoader::new().with_file(path),
		None => ConfigLoader::new(),
	};
	let mut config = loader.load().context("Failed to load configuration")?;

	if let Some(level) = log_level {
		config.logging.level = level;
		statement_config::validate_config(&config).context("Invalid log level")?;
	}

	Ok(config)
}

async fn start_service(config: ServiceConfig) -> Result<()> {
	info!("Starting Customer Statement Processor");
	info!("Service name: {}", config.service.name);
	info!("HTTP address: {}", config.service.bind_address());

	StatementService::new(config).run().await
}

fn validate_config(config: &ServiceConfig) {
	info!("Configuration is valid");
	info!("Service name: {}", config.service.name);
	info!("HTTP address: {}", config.service.bind_address());
	info!("Max request size: {} bytes", config.service.max_request_size);
	info!("CORS permissive: {}", config.api.cors_permissive);
	info!(
		"Logging: level={} format={:?}",
		config.logging.level, config.logging.format
	);
}

fn check_statements(file: &Path, fail_on_violation: bool) -> Result<()> {
	let result = service::check_file(&StatementValidator::new(), file)?;

	let output = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
	println!("{}", output);

	if fail_on_violation && !result.result.is_success() {
		anyhow::bail!("Statement batch classified as {}", result.result);
	}

	Ok(())
}
