use crate::message::error::{MessageError, Operation};
use crate::server::rest_api::error::ApiErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

impl From<MessageError> for ApiErrorResponse {
	fn from(error: MessageError) -> Self {
		use MessageError::*;
		match error {
			Validation(validation) => ApiErrorResponse::new(StatusCode::BAD_REQUEST, validation.to_string())
				.with_required_fields(validation.required_fields()),
			NotFound => ApiErrorResponse::new(StatusCode::NOT_FOUND, error.to_string()),
			QueryTimeout(_) => {
				ApiErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, Operation::List.to_string()).with_details(error)
			}
			Store { operation, source } => {
				ApiErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, operation.to_string()).with_details(source)
			}
		}
	}
}

impl IntoResponse for MessageError {
	fn into_response(self) -> Response {
		ApiErrorResponse::from(self).into_response()
	}
}
