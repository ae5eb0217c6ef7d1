use crate::configuration::Configuration;
use crate::context::ApplicationContext;
use crate::database::connection_manager::ConnectionManager;
use crate::message::MessageService;
use crate::message::model::Message;
use crate::server::rest_api::error::ApiErrorResponse;
use crate::server::rest_api::models::{
	CreateMessageRequest, DatabaseHealth, HealthResponse, ListMessagesQuery, SuccessResponse, UpdateMessageRequest,
};
use crate::server::rest_api::request::RequestBody;
use crate::server::rest_api::response::Created;
use crate::types::date_time::DateTime;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

pub mod api_docs;
pub mod error;
mod models;
mod request;
mod response;

pub fn rest_api() -> Router<ApplicationContext> {
	Router::new()
		.route("/messages", get(list_messages).post(create_message))
		.route(
			"/messages/{id}",
			get(get_message).put(update_message).delete(delete_message),
		)
		.route("/health", get(health))
}

async fn create_message(
	State(message_service): State<MessageService>,
	RequestBody(request): RequestBody<CreateMessageRequest>,
) -> Result<Created<Json<SuccessResponse<Message>>>, ApiErrorResponse> {
	let message = message_service
		.create(
			request.sender.as_deref().unwrap_or_default(),
			request.content.as_deref().unwrap_or_default(),
		)
		.await?;

	Ok(Created(Json(
		SuccessResponse::data(message).with_message("Message sent successfully"),
	)))
}

async fn list_messages(
	State(message_service): State<MessageService>,
	query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<SuccessResponse<Vec<Message>>>, ApiErrorResponse> {
	let Query(pairs) = query?;
	let query = pairs.into_iter().collect::<ListMessagesQuery>();
	let page = message_service.list(&query.into()).await?;

	Ok(Json(
		SuccessResponse::data(page.records).with_pagination(page.pagination),
	))
}

async fn get_message(
	State(message_service): State<MessageService>,
	path: Result<Path<String>, PathRejection>,
) -> Result<Json<SuccessResponse<Message>>, ApiErrorResponse> {
	let Path(id) = path?;
	let message = message_service.get(&id).await?;

	Ok(Json(SuccessResponse::data(message)))
}

async fn update_message(
	State(message_service): State<MessageService>,
	path: Result<Path<String>, PathRejection>,
	RequestBody(request): RequestBody<UpdateMessageRequest>,
) -> Result<Json<SuccessResponse<Message>>, ApiErrorResponse> {
	let Path(id) = path?;
	let message = message_service
		.update(&id, request.content.as_deref().unwrap_or_default())
		.await?;

	Ok(Json(
		SuccessResponse::data(message).with_message("Message updated successfully"),
	))
}

async fn delete_message(
	State(message_service): State<MessageService>,
	path: Result<Path<String>, PathRejection>,
) -> Result<Json<SuccessResponse<()>>, ApiErrorResponse> {
	let Path(id) = path?;
	message_service.delete(&id).await?;

	Ok(Json(SuccessResponse::message("Message deleted successfully")))
}

/// Liveness is implied by answering at all, readiness is the database connection status.
async fn health(
	State(configuration): State<Configuration>,
	State(connection_manager): State<ConnectionManager>,
) -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "ok",
		timestamp: DateTime::now(),
		environment: configuration.environment,
		database: DatabaseHealth {
			status: connection_manager.status(),
		},
	})
}
