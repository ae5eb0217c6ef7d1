use crate::types::date_time::DateTime;
use crate::types::uuid::Uuid;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use sqlx::FromRow;

#[derive(FromRow, Clone, Debug, PartialEq, Eq)]
pub struct Message {
	pub id: Uuid,
	pub sender: String,
	pub content: String,
	pub created_at: DateTime,
	/// `None` until the content has been updated for the first time.
	pub updated_at: Option<DateTime>,
}

/// `timestamp` repeats `createdAt`, it is the field lists are sorted by default.
impl Serialize for Message {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut message = serializer.serialize_struct("Message", 6)?;
		message.serialize_field("id", &self.id)?;
		message.serialize_field("sender", &self.sender)?;
		message.serialize_field("content", &self.content)?;
		message.serialize_field("timestamp", &self.created_at)?;
		message.serialize_field("createdAt", &self.created_at)?;
		message.serialize_field("updatedAt", &self.updated_at)?;
		message.end()
	}
}

impl TryFrom<libsql::Row> for Message {
	type Error = anyhow::Error;

	fn try_from(row: libsql::Row) -> anyhow::Result<Self> {
		let id = row.get_value(0)?;
		let sender = row.get(1)?;
		let content = row.get(2)?;
		let created_at = row.get_value(3)?;
		let updated_at = match row.get_value(4)? {
			libsql::Value::Null => None,
			value => Some(DateTime::try_from(value)?),
		};

		Ok(Self {
			id: id.try_into()?,
			sender,
			content,
			created_at: created_at.try_into()?,
			updated_at,
		})
	}
}
