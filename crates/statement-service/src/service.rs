//! Service lifecycle: tracing setup, HTTP server and offline checks.

use crate::api::{build_router, AppState};
use anyhow::{Context, Result};
use statement_config::{LogFormat, LoggingConfig, ServiceConfig};
use statement_core::StatementValidator;
use statement_types::{StatementRecord, ValidationResult};
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber. `RUST_LOG` takes precedence over
/// the configured level.
pub fn setup_tracing(logging: &LoggingConfig) -> Result<()> {
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

	let registry = tracing_subscriber::registry().with(env_filter);
	match logging.format {
		LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
		LogFormat::Json => registry
			.with(tracing_subscriber::fmt::layer().json())
			.try_init(),
	}
	.context("Failed to initialize tracing")?;

	Ok(())
}

/// The statement processor HTTP service.
pub struct StatementService {
	config: ServiceConfig,
	validator: Arc<StatementValidator>,
}

impl StatementService {
	pub fn new(config: ServiceConfig) -> Self {
		Self {
			config,
			validator: Arc::new(StatementValidator::new()),
		}
	}

	/// Binds the configured address and serves until Ctrl+C or SIGTERM.
	pub async fn run(self) -> Result<()> {
		let state = AppState::new(self.validator.clone(), self.config.service.name.as_str());
		let app = build_router(state, &self.config);

		let bind_address = self.config.service.bind_address();
		let listener = tokio::net::TcpListener::bind(&bind_address)
			.await
			.with_context(|| format!("Failed to bind {}", bind_address))?;

		info!("Statement processor listening on {}", bind_address);

		axum::serve(listener, app)
			.with_graceful_shutdown(shutdown_signal())
			.await
			.context("HTTP server error")?;

		info!("Statement processor stopped");
		Ok(())
	}
}

/// Reads a JSON array of records from `path` and validates it.
pub fn check_file<P: AsRef<Path>>(validator: &StatementValidator, path: P) -> Result<ValidationResult> {
	let path = path.as_ref();
	let records = StatementRecord::parse_batch_file(path)
		.with_context(|| format!("Failed to load statement file: {:?}", path))?;

	info!(records = records.len(), "Checking statement file {:?}", path);
	Ok(validator.validate(&records))
}

async fn shutdown_signal() {
	let ctrl_c = async {
		signal::ctrl_c()
			.await
			.expect("failed to install Ctrl+C handler");
	};

	#[cfg(unix)]
	let terminate = async {
		signal::unix::signal(signal::unix::SignalKind::terminate())
			.expect("failed to install signal handler")
			.recv()
			.await;
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	info!("Shutdown signal received");
}
