//! HTTP API for processing customer statements.

use axum::{
	extract::{rejection::JsonRejection, DefaultBodyLimit, State},
	http::{Method, StatusCode},
	response::{IntoResponse, Json, Response},
	routing::{get, post},
	Router,
};
use statement_config::ServiceConfig;
use statement_core::StatementValidator;
use statement_types::{FailureCode, FailureResponse, HealthResponse, StatementRecord, ValidationResult};
use std::any::Any;
use std::sync::Arc;
use thiserror::Error;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, instrument};

/// Route accepting statement batches.
pub const PROCESS_PATH: &str = "/customerstatement/v1/process";

/// Failures surfaced before or outside the validator.
#[derive(Error, Debug)]
pub enum ApiError {
	#[error("Malformed input: {0}")]
	MalformedInput(String),

	#[error("Internal error: {0}")]
	Internal(String),
}

impl ApiError {
	fn status_and_code(&self) -> (StatusCode, FailureCode) {
		match self {
			ApiError::MalformedInput(_) => (StatusCode::BAD_REQUEST, FailureCode::BadRequest),
			ApiError::Internal(_) => (
				StatusCode::INTERNAL_SERVER_ERROR,
				FailureCode::InternalServerError,
			),
		}
	}
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		let message = rejection.body_text();
		match rejection {
			// Not a body problem, the request is not a JSON request at all.
			JsonRejection::MissingJsonContentType(_) => ApiError::Internal(message),
			_ => ApiError::MalformedInput(message),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let (status, code) = self.status_and_code();
		error!(status = %status, "Request failed: {}", self);
		(status, Json(FailureResponse::new(code))).into_response()
	}
}

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	validator: Arc<StatementValidator>,
	service_name: Arc<str>,
}

impl AppState {
	pub fn new(validator: Arc<StatementValidator>, service_name: impl Into<Arc<str>>) -> Self {
		Self {
			validator,
			service_name: service_name.into(),
		}
	}
}

/// Builds the router with all routes and middleware.
pub fn build_router(state: AppState, config: &ServiceConfig) -> Router {
	let router = Router::new()
		.route("/health", get(health_check))
		.route(
			PROCESS_PATH,
			post(process_statements).fallback(unsupported_method),
		)
		.with_state(state)
		.layer(DefaultBodyLimit::max(config.service.max_request_size))
		.layer(CatchPanicLayer::custom(handle_panic))
		.layer(TraceLayer::new_for_http());

	if config.api.cors_permissive {
		router.layer(CorsLayer::permissive())
	} else {
		router
	}
}

/// Handles POST /customerstatement/v1/process.
///
/// Every classification, including violations, is a 200 response. Only a
/// payload that cannot be read as a list of records is rejected.
#[instrument(skip_all)]
async fn process_statements(
	State(state): State<AppState>,
	payload: Result<Json<Vec<StatementRecord>>, JsonRejection>,
) -> Result<Json<ValidationResult>, ApiError> {
	let Json(records) = payload?;
	info!(records = records.len(), "Processing customer statement");

	let result = state.validator.validate(&records);
	info!(
		result = %result.result,
		error_records = result.error_records.len(),
		"Customer statement processed"
	);
	Ok(Json(result))
}

async fn unsupported_method(method: Method) -> ApiError {
	ApiError::Internal(format!("Request method '{}' is not supported", method))
}

/// Basic health check - returns 200 if the service is running
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "ok".to_string(),
		service: state.service_name.to_string(),
		version: env!("CARGO_PKG_VERSION").to_string(),
		timestamp: chrono::Utc::now().timestamp(),
	})
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
	let details = if let Some(s) = err.downcast_ref::<String>() {
		s.clone()
	} else if let Some(s) = err.downcast_ref::<&str>() {
		s.to_string()
	} else {
		"unknown panic".to_string()
	};

	ApiError::Internal(format!("Handler panicked: {}", details)).into_response()
}
