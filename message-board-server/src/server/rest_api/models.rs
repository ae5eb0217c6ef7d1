use crate::configuration::Environment;
use crate::database::connection_manager::ConnectionStatus;
use crate::message::pagination::{ListParameters, Pagination};
use crate::types::date_time::DateTime;
use serde::{Deserialize, Serialize};

/// Fields are optional so that missing ones are reported as validation errors instead of malformed bodies.
#[derive(Deserialize, Default)]
pub struct CreateMessageRequest {
	pub sender: Option<String>,
	pub content: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct UpdateMessageRequest {
	pub content: Option<String>,
}

#[derive(Default)]
pub struct ListMessagesQuery {
	pub page: Option<String>,
	pub limit: Option<String>,
	pub sort_by: Option<String>,
	pub sort_order: Option<String>,
	pub sender: Option<String>,
}

impl FromIterator<(String, String)> for ListMessagesQuery {
	/// Keeps the first value of repeated parameters and ignores unknown ones.
	fn from_iter<Pairs: IntoIterator<Item = (String, String)>>(pairs: Pairs) -> Self {
		let mut query = Self::default();
		for (key, value) in pairs {
			let slot = match key.as_str() {
				"page" => &mut query.page,
				"limit" => &mut query.limit,
				"sortBy" => &mut query.sort_by,
				"sortOrder" => &mut query.sort_order,
				"sender" => &mut query.sender,
				_ => continue,
			};
			if slot.is_none() {
				*slot = Some(value);
			}
		}
		query
	}
}

impl From<ListMessagesQuery> for ListParameters {
	fn from(query: ListMessagesQuery) -> Self {
		ListParameters::parse(
			query.page.as_deref(),
			query.limit.as_deref(),
			query.sort_by.as_deref(),
			query.sort_order.as_deref(),
			query.sender.as_deref(),
		)
	}
}

#[derive(Serialize)]
pub struct SuccessResponse<T> {
	success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	message: Option<&'static str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pagination: Option<Pagination>,
}

impl<T> SuccessResponse<T> {
	pub fn data(data: T) -> Self {
		Self {
			success: true,
			message: None,
			data: Some(data),
			pagination: None,
		}
	}

	#[must_use]
	pub fn with_message(mut self, message: &'static str) -> Self {
		self.message = Some(message);
		self
	}

	#[must_use]
	pub fn with_pagination(mut self, pagination: Pagination) -> Self {
		self.pagination = Some(pagination);
		self
	}
}

impl SuccessResponse<()> {
	pub fn message(message: &'static str) -> Self {
		Self {
			success: true,
			message: Some(message),
			data: None,
			pagination: None,
		}
	}
}

#[derive(Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
	pub timestamp: DateTime,
	pub environment: Environment,
	pub database: DatabaseHealth,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
	pub status: ConnectionStatus,
}
