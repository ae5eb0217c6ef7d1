use crate::database::connection_manager::ConnectionManager;
use crate::database::{Connection, Repository};
use crate::message::error::{MessageError, Operation, ValidationError};
use crate::message::model::Message;
use crate::message::pagination::{ListParameters, MessagePage, Pagination};
use crate::types::date_time::DateTime;
use crate::types::uuid::Uuid;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub mod error;
pub mod model;
pub mod pagination;
pub mod repository;

#[derive(Clone)]
pub struct MessageService {
	connection_manager: ConnectionManager,
	query_timeout: Duration,
}

impl MessageService {
	pub fn new(connection_manager: ConnectionManager, query_timeout: Duration) -> Self {
		Self {
			connection_manager,
			query_timeout,
		}
	}

	pub async fn create(&self, sender: &str, content: &str) -> Result<Message, MessageError> {
		let sender = sender.trim();
		let content = content.trim();
		if sender.is_empty() || content.is_empty() {
			return Err(ValidationError::MissingFields.into());
		}

		let operation = Operation::Create;
		let (repository, mut connection) = self.checkout(operation).await?;
		let message = repository
			.message()
			.create(connection.as_mut(), sender, content, DateTime::now())
			.await
			.map_err(operation.failed())?;

		info!(id = %message.id, sender = %message.sender, "Created message");
		Ok(message)
	}

	/// Fetches one page of messages together with the total of all matching messages.
	///
	/// Both queries share one `query_timeout` budget. When it runs out, the queries are dropped.
	pub async fn list(&self, parameters: &ListParameters) -> Result<MessagePage, MessageError> {
		let operation = Operation::List;
		let query = async {
			let (repository, mut connection) = self.checkout(operation).await?;
			let records = repository
				.message()
				.list(connection.as_mut(), parameters)
				.await
				.map_err(operation.failed())?;
			let total = repository
				.message()
				.count(connection.as_mut(), parameters.sender.as_deref())
				.await
				.map_err(operation.failed())?;

			Ok::<_, MessageError>(MessagePage {
				records,
				pagination: Pagination::new(total, parameters),
			})
		};

		let Ok(result) = tokio::time::timeout(self.query_timeout, query).await else {
			warn!(timeout = ?self.query_timeout, ?parameters, "Listing messages timed out");
			return Err(MessageError::QueryTimeout(self.query_timeout));
		};

		if let Ok(page) = &result {
			debug!(
				records = page.records.len(),
				total = page.pagination.total,
				"Retrieved messages"
			);
		}
		result
	}

	pub async fn get(&self, id: &str) -> Result<Message, MessageError> {
		let id = parse_id(id)?;

		let operation = Operation::Get;
		let (repository, mut connection) = self.checkout(operation).await?;
		repository
			.message()
			.get(connection.as_mut(), id)
			.await
			.map_err(operation.failed())?
			.ok_or(MessageError::NotFound)
	}

	pub async fn update(&self, id: &str, content: &str) -> Result<Message, MessageError> {
		let content = content.trim();
		if content.is_empty() {
			return Err(ValidationError::MissingContent.into());
		}
		let id = parse_id(id)?;

		let operation = Operation::Update;
		let (repository, mut connection) = self.checkout(operation).await?;
		let message = repository
			.message()
			.update_content(connection.as_mut(), id, content, DateTime::now())
			.await
			.map_err(operation.failed())?
			.ok_or(MessageError::NotFound)?;

		info!(%id, "Updated message");
		Ok(message)
	}

	pub async fn delete(&self, id: &str) -> Result<(), MessageError> {
		let id = parse_id(id)?;

		let operation = Operation::Delete;
		let (repository, mut connection) = self.checkout(operation).await?;
		let removed = repository
			.message()
			.remove(connection.as_mut(), id)
			.await
			.map_err(operation.failed())?;
		if !removed {
			return Err(MessageError::NotFound);
		}

		info!(%id, "Deleted message");
		Ok(())
	}

	async fn checkout(&self, operation: Operation) -> Result<(Arc<dyn Repository>, Box<dyn Connection>), MessageError> {
		let database = self.connection_manager.database().map_err(operation.failed())?;
		let connection = database.connection().await.map_err(operation.failed())?;

		Ok((database.repository(), connection))
	}
}

/// Text that isn't a valid id can't name an existing message.
fn parse_id(id: &str) -> Result<Uuid, MessageError> {
	Uuid::from_str(id.trim()).map_err(|_| MessageError::NotFound)
}
