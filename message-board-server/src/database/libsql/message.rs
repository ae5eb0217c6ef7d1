use super::{LibSqlRepository, libsql_connection};
use crate::database::Connection;
use crate::database::error::DatabaseError;
use crate::message::model::Message;
use crate::message::pagination::ListParameters;
use crate::message::repository::{COUNT_STATEMENT, MessageRepository, list_statement};
use crate::types::date_time::DateTime;
use crate::types::uuid::Uuid;
use anyhow::anyhow;
use async_trait::async_trait;
use libsql::{Rows, Value};

#[async_trait]
impl MessageRepository for LibSqlRepository {
	async fn get(&self, connection: &mut dyn Connection, id: Uuid) -> Result<Option<Message>, DatabaseError> {
		let connection = libsql_connection(connection)?;

		let rows = connection
			.query(
				r"SELECT id, sender, content, created_at, updated_at
			FROM message
			WHERE id = ?1",
				[id],
			)
			.await?;

		optional_message(rows).await
	}

	async fn create(
		&self,
		connection: &mut dyn Connection,
		sender: &str,
		content: &str,
		created_at: DateTime,
	) -> Result<Message, DatabaseError> {
		let connection = libsql_connection(connection)?;

		let id = Uuid::new_v4();
		let rows = connection
			.query(
				r"INSERT INTO message(id, sender, content, created_at, updated_at)
			VALUES (?1, ?2, ?3, ?4, NULL)
			RETURNING
				id,
				sender,
				content,
				created_at,
				updated_at",
				(
					Value::from(id),
					sender.to_owned(),
					content.to_owned(),
					Value::from(created_at),
				),
			)
			.await?;

		optional_message(rows)
			.await?
			.ok_or_else(|| DatabaseError::MissingRow(anyhow!("Inserted message was not returned")))
	}

	async fn update_content(
		&self,
		connection: &mut dyn Connection,
		id: Uuid,
		content: &str,
		updated_at: DateTime,
	) -> Result<Option<Message>, DatabaseError> {
		let connection = libsql_connection(connection)?;

		let rows = connection
			.query(
				r"UPDATE message
			SET content = ?2, updated_at = ?3
			WHERE id = ?1
			RETURNING
				id,
				sender,
				content,
				created_at,
				updated_at",
				(Value::from(id), content.to_owned(), Value::from(updated_at)),
			)
			.await?;

		optional_message(rows).await
	}

	async fn remove(&self, connection: &mut dyn Connection, id: Uuid) -> Result<bool, DatabaseError> {
		let connection = libsql_connection(connection)?;

		let removed = connection.execute(r"DELETE FROM message WHERE id = ?1", [id]).await?;
		Ok(removed > 0)
	}

	async fn list(
		&self,
		connection: &mut dyn Connection,
		parameters: &ListParameters,
	) -> Result<Vec<Message>, DatabaseError> {
		let connection = libsql_connection(connection)?;

		let offset = i64::try_from(parameters.offset())
			.map_err(|_| DatabaseError::Encode(anyhow!("Offset exceeds the supported range")))?;
		let mut rows = connection
			.query(
				&list_statement(parameters),
				(
					optional_text(parameters.sender.as_deref()),
					i64::from(parameters.limit),
					offset,
				),
			)
			.await?;

		let mut messages = Vec::new();
		while let Some(row) = rows.next().await? {
			messages.push(Message::try_from(row).map_err(DatabaseError::Decode)?);
		}
		Ok(messages)
	}

	async fn count(&self, connection: &mut dyn Connection, sender: Option<&str>) -> Result<u64, DatabaseError> {
		let connection = libsql_connection(connection)?;

		let mut rows = connection.query(COUNT_STATEMENT, [optional_text(sender)]).await?;
		let row = rows
			.next()
			.await?
			.ok_or_else(|| DatabaseError::MissingRow(anyhow!("Count returned no rows")))?;
		let count = row.get::<i64>(0)?;
		u64::try_from(count).map_err(|error| DatabaseError::Decode(error.into()))
	}
}

async fn optional_message(mut rows: Rows) -> Result<Option<Message>, DatabaseError> {
	let Some(row) = rows.next().await? else {
		return Ok(None);
	};

	Ok(Some(Message::try_from(row).map_err(DatabaseError::Decode)?))
}

fn optional_text(text: Option<&str>) -> Value {
	text.map_or(Value::Null, |text| Value::Text(text.to_owned()))
}
