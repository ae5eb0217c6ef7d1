use crate::server::rest_api::error::ApiErrorResponse;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_LENGTH;
use serde::de::DeserializeOwned;

/// JSON request body where a missing body counts as an empty object.
///
/// Requests without a body or without a JSON content type deserialize to `T::default()`,
/// so their missing fields end up as validation errors. Syntax errors are still rejected.
pub struct RequestBody<T>(pub T);

impl<T, S> FromRequest<S> for RequestBody<T>
where
	T: DeserializeOwned + Default,
	S: Send + Sync,
{
	type Rejection = ApiErrorResponse;

	async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
		if has_empty_body(&request) {
			return Ok(Self(T::default()));
		}

		match Json::<T>::from_request(request, state).await {
			Ok(Json(body)) => Ok(Self(body)),
			Err(JsonRejection::MissingJsonContentType(_)) => Ok(Self(T::default())),
			Err(rejection) => Err(rejection.into()),
		}
	}
}

fn has_empty_body(request: &Request) -> bool {
	request
		.headers()
		.get(CONTENT_LENGTH)
		.and_then(|length| length.to_str().ok())
		.is_some_and(|length| length.trim() == "0")
}
