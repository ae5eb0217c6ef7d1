use crate::database::error::DatabaseError;
use crate::database::libsql::pool::{LibSqlManager, LibSqlPool};
use crate::database::{Connection, Database, Repository};
use crate::message::repository::MessageRepository;
use anyhow::anyhow;
use async_trait::async_trait;
use deadpool::managed::{Object, PoolError};
use std::any::Any;
use std::ops::DerefMut;
use std::sync::Arc;

mod message;
mod migration;
mod pool;
#[cfg(test)]
pub mod test_utils;

const IN_MEMORY_PATH: &str = ":memory:";

/// Local libSQL database file behind a connection pool.
pub struct LibSqlDatabase {
	pool: LibSqlPool,
}

impl LibSqlDatabase {
	pub async fn open(path: &str) -> Result<Self, DatabaseError> {
		let database = libsql::Builder::new_local(path).build().await?;

		let mut builder = LibSqlPool::builder(LibSqlManager::new(database));
		// Every connection to ":memory:" opens a separate database.
		if path == IN_MEMORY_PATH {
			builder = builder.max_size(1);
		}
		let pool = builder
			.build()
			.map_err(|error| DatabaseError::Connection(anyhow!("Failed to build libSQL pool: {error}")))?;

		Ok(Self { pool })
	}
}

#[async_trait]
impl Database for LibSqlDatabase {
	async fn migrate(&mut self) -> Result<(), DatabaseError> {
		let mut connection = self.connection().await?;
		migration::run_migrations(connection.as_mut()).await?;

		Ok(())
	}

	async fn connection(&self) -> Result<Box<dyn Connection>, DatabaseError> {
		self.pool
			.get()
			.await
			.map(|connection| Box::new(connection) as Box<dyn Connection>)
			.map_err(Into::into)
	}

	fn repository(&self) -> Arc<dyn Repository> {
		Arc::new(LibSqlRepository)
	}

	async fn close(&self) {
		self.pool.close();
	}
}

impl Connection for Object<LibSqlManager> {}

#[derive(Default, Clone, Copy)]
pub struct LibSqlRepository;

impl Repository for LibSqlRepository {
	fn message(&self) -> &dyn MessageRepository {
		self
	}
}

impl From<PoolError<libsql::Error>> for DatabaseError {
	fn from(pool_error: PoolError<libsql::Error>) -> Self {
		use PoolError::*;
		match pool_error {
			Timeout(_) => Self::Timeout(pool_error.into()),
			Backend(error) => error.into(),
			Closed | NoRuntimeSpecified | PostCreateHook(_) => Self::Connection(pool_error.into()),
		}
	}
}

/// Primary result code of `SQLITE_CONSTRAINT`, extended codes keep it in their lowest byte.
const SQLITE_CONSTRAINT: i32 = 19;

impl From<libsql::Error> for DatabaseError {
	fn from(error: libsql::Error) -> Self {
		use libsql::Error::*;
		match error {
			SqliteFailure(code, _) if code & 0xff == SQLITE_CONSTRAINT => Self::ConstraintViolation(error.into()),
			ToSqlConversionFailure(_) => Self::Encode(error.into()),
			QueryReturnedNoRows => Self::MissingRow(error.into()),
			InvalidColumnIndex | InvalidColumnType => Self::Decode(error.into()),
			ConnectionFailed(_) | InvalidUTF8Path | InvalidParserState(_) | InvalidTlsConfiguration(_) => {
				Self::Connection(error.into())
			}
			_ => Self::Database(error.into()),
		}
	}
}

fn libsql_connection(connection: &mut dyn Connection) -> Result<&mut libsql::Connection, DatabaseError> {
	let type_name = connection.type_name();

	let connection: &mut dyn Any = connection;
	connection
		.downcast_mut::<Object<LibSqlManager>>()
		.map(DerefMut::deref_mut)
		.ok_or_else(|| DatabaseError::DatabaseMismatch(anyhow!("Expected libSQL connection, got {type_name}")))
}
