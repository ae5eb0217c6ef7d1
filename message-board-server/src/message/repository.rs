use crate::database::Connection;
use crate::database::error::DatabaseError;
use crate::message::model;
use crate::message::pagination::ListParameters;
use crate::types::date_time::DateTime;
use crate::types::uuid::Uuid;
use async_trait::async_trait;
use static_assertions::assert_obj_safe;


#[async_trait]
pub trait MessageRepository: Send + Sync + 'static {
	async fn get(&self, connection: &mut dyn Connection, id: Uuid) -> Result<Option<model::Message>, DatabaseError>;

	async fn create(
		&self,
		connection: &mut dyn Connection,
		sender: &str,
		content: &str,
		created_at: DateTime,
	) -> Result<model::Message, DatabaseError>;

	/// Returns `None` if no message with the given id exists.
	async fn update_content(
		&self,
		connection: &mut dyn Connection,
		id: Uuid,
		content: &str,
		updated_at: DateTime,
	) -> Result<Option<model::Message>, DatabaseError>;

	/// Returns whether a message was removed.
	async fn remove(&self, connection: &mut dyn Connection, id: Uuid) -> Result<bool, DatabaseError>;

	async fn list(
		&self,
		connection: &mut dyn Connection,
		parameters: &ListParameters,
	) -> Result<Vec<model::Message>, DatabaseError>;

	async fn count(&self, connection: &mut dyn Connection, sender: Option<&str>) -> Result<u64, DatabaseError>;
}

assert_obj_safe!(MessageRepository);

/// Query shared by all backends. `?1` is the optional sender, `?2` the limit and `?3` the offset.
///
/// Sorting ties are broken by id in the same direction, so consecutive pages never overlap.
pub(crate) fn list_statement(parameters: &ListParameters) -> String {
	let column = parameters.sort_by.column();
	let direction = parameters.sort_order.keyword();
	format!(
		r"SELECT id, sender, content, created_at, updated_at
			FROM message
			WHERE (?1 IS NULL OR sender = ?1)
			ORDER BY {column} {direction}, id {direction}
			LIMIT ?2 OFFSET ?3"
	)
}

pub(crate) const COUNT_STATEMENT: &str = r"SELECT COUNT(*) FROM message WHERE (?1 IS NULL OR sender = ?1)";
