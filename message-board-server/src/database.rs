use crate::database::error::DatabaseError;
use crate::database::libsql::LibSqlDatabase;
use crate::database::sqlite::SqliteDatabase;
use crate::message::repository::MessageRepository;
use anyhow::anyhow;
use async_trait::async_trait;
use static_assertions::assert_obj_safe;
use std::any::{Any, type_name};
use std::sync::Arc;

pub mod connection_manager;
pub mod error;
pub mod libsql;
pub mod sqlite;

#[async_trait]
pub trait Database: Send + Sync {
	async fn migrate(&mut self) -> Result<(), DatabaseError>;

	async fn connection(&self) -> Result<Box<dyn Connection>, DatabaseError>;

	/// Repository that understands the connections handed out by this database.
	fn repository(&self) -> Arc<dyn Repository>;

	async fn close(&self);
}

assert_obj_safe!(Database);

pub trait Connection: Any + Send + Sync {
	fn type_name(&self) -> &'static str {
		type_name::<Self>()
	}
}

assert_obj_safe!(Connection);

pub trait Repository: MessageRepository + Send + Sync + 'static {
	fn message(&self) -> &dyn MessageRepository;
}

assert_obj_safe!(Repository);

/// Opens and migrates the database referenced by `database_url`.
///
/// `sqlite:` URLs are handled by sqlx, `libsql:` URLs open a local libSQL
/// database at the path following the scheme (`libsql::memory:` for an
/// in-memory database).
pub async fn open(database_url: &str) -> Result<Arc<dyn Database>, DatabaseError> {
	if database_url.starts_with("sqlite:") {
		let mut database = SqliteDatabase::connect(database_url).await?;
		database.migrate().await?;
		return Ok(Arc::new(database));
	}

	if let Some(path) = database_url.strip_prefix("libsql:") {
		let mut database = LibSqlDatabase::open(path).await?;
		database.migrate().await?;
		return Ok(Arc::new(database));
	}

	Err(DatabaseError::Connection(anyhow!(
		"Unsupported database URL '{database_url}', expected 'sqlite:' or 'libsql:' scheme"
	)))
}
