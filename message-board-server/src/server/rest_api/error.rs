use crate::configuration::Configuration;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::any::Any;
use tracing::error;

mod message;

/// Error envelope sent to clients.
///
/// `details` carries the underlying cause. It is left out when rendering and only
/// put back in by [`expose_error_details`] outside of production.
#[derive(Clone, Debug)]
pub struct ApiErrorResponse {
	status: StatusCode,
	error: String,
	required_fields: Option<&'static [&'static str]>,
	details: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
	success: bool,
	error: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	required_fields: Option<&'static [&'static str]>,
	#[serde(skip_serializing_if = "Option::is_none")]
	details: Option<&'a str>,
}

impl ApiErrorResponse {
	pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
		Self {
			status,
			error: error.into(),
			required_fields: None,
			details: None,
		}
	}

	#[must_use]
	pub fn with_details(mut self, details: impl ToString) -> Self {
		self.details = Some(details.to_string());
		self
	}

	#[must_use]
	pub fn with_required_fields(mut self, required_fields: Option<&'static [&'static str]>) -> Self {
		self.required_fields = required_fields;
		self
	}

	pub fn route_not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND, "Route not found")
	}

	pub fn internal_server_error(details: impl ToString) -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").with_details(details)
	}

	fn render(&self, include_details: bool) -> Response {
		let body = ErrorBody {
			success: false,
			error: &self.error,
			required_fields: self.required_fields,
			details: self.details.as_deref().filter(|_| include_details),
		};
		(self.status, Json(body)).into_response()
	}
}

impl IntoResponse for ApiErrorResponse {
	fn into_response(self) -> Response {
		let mut response = self.render(false);
		response.extensions_mut().insert(self);
		response
	}
}

impl From<JsonRejection> for ApiErrorResponse {
	fn from(rejection: JsonRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "Invalid request body").with_details(rejection.body_text())
	}
}

impl From<QueryRejection> for ApiErrorResponse {
	fn from(rejection: QueryRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "Invalid query string").with_details(rejection.body_text())
	}
}

impl From<PathRejection> for ApiErrorResponse {
	fn from(rejection: PathRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "Invalid request path").with_details(rejection.body_text())
	}
}

/// Re-renders error responses including their details unless running in production.
pub async fn expose_error_details(State(configuration): State<Configuration>, response: Response) -> Response {
	if !configuration.environment.exposes_error_details() {
		return response;
	}

	match response.extensions().get::<ApiErrorResponse>() {
		Some(error) if error.details.is_some() => error.render(true),
		_ => response,
	}
}

pub async fn route_not_found() -> ApiErrorResponse {
	ApiErrorResponse::route_not_found()
}

pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
	let details = if let Some(message) = panic.downcast_ref::<String>() {
		message.clone()
	} else if let Some(message) = panic.downcast_ref::<&str>() {
		(*message).to_owned()
	} else {
		"Unknown panic".to_owned()
	};

	error!(%details, "Request handler panicked");
	ApiErrorResponse::internal_server_error(details).into_response()
}
