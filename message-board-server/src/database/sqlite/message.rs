use super::{SqliteRepository, sqlite_connection};
use crate::database::Connection;
use crate::database::error::DatabaseError;
use crate::message::model::Message;
use crate::message::pagination::ListParameters;
use crate::message::repository::{COUNT_STATEMENT, MessageRepository, list_statement};
use crate::types::date_time::DateTime;
use crate::types::uuid::Uuid;
use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::{query, query_as, query_scalar};

#[async_trait]
impl MessageRepository for SqliteRepository {
	async fn get(&self, connection: &mut dyn Connection, id: Uuid) -> Result<Option<Message>, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		query_as(
			r"SELECT id, sender, content, created_at, updated_at
			FROM message
			WHERE id = ?1",
		)
		.bind(id)
		.fetch_optional(connection)
		.await
		.map_err(Into::into)
	}

	async fn create(
		&self,
		connection: &mut dyn Connection,
		sender: &str,
		content: &str,
		created_at: DateTime,
	) -> Result<Message, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		let id = Uuid::new_v4();
		query_as(
			r"INSERT INTO message(id, sender, content, created_at, updated_at)
			VALUES (?1, ?2, ?3, ?4, NULL)
			RETURNING
				id,
				sender,
				content,
				created_at,
				updated_at",
		)
		.bind(id)
		.bind(sender)
		.bind(content)
		.bind(created_at)
		.fetch_one(connection)
		.await
		.map_err(Into::into)
	}

	async fn update_content(
		&self,
		connection: &mut dyn Connection,
		id: Uuid,
		content: &str,
		updated_at: DateTime,
	) -> Result<Option<Message>, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		query_as(
			r"UPDATE message
			SET content = ?2, updated_at = ?3
			WHERE id = ?1
			RETURNING
				id,
				sender,
				content,
				created_at,
				updated_at",
		)
		.bind(id)
		.bind(content)
		.bind(updated_at)
		.fetch_optional(connection)
		.await
		.map_err(Into::into)
	}

	async fn remove(&self, connection: &mut dyn Connection, id: Uuid) -> Result<bool, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		let result = query(r"DELETE FROM message WHERE id = ?1")
			.bind(id)
			.execute(connection)
			.await?;
		Ok(result.rows_affected() > 0)
	}

	async fn list(
		&self,
		connection: &mut dyn Connection,
		parameters: &ListParameters,
	) -> Result<Vec<Message>, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		let statement = list_statement(parameters);
		query_as(&statement)
			.bind(parameters.sender.as_deref())
			.bind(i64::from(parameters.limit))
			.bind(offset(parameters)?)
			.fetch_all(connection)
			.await
			.map_err(Into::into)
	}

	async fn count(&self, connection: &mut dyn Connection, sender: Option<&str>) -> Result<u64, DatabaseError> {
		let connection = sqlite_connection(connection)?;

		let count: i64 = query_scalar(COUNT_STATEMENT).bind(sender).fetch_one(connection).await?;
		u64::try_from(count).map_err(|error| DatabaseError::Decode(error.into()))
	}
}

fn offset(parameters: &ListParameters) -> Result<i64, DatabaseError> {
	i64::try_from(parameters.offset()).map_err(|_| DatabaseError::Encode(anyhow!("Offset exceeds the supported range")))
}
