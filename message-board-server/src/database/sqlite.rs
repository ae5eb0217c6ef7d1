use crate::database::error::{DatabaseError, IntoStoreResult};
use crate::database::{Connection, Database, Repository};
use crate::message::repository::MessageRepository;
use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, migrate};
use std::any::Any;
use std::ops::DerefMut;
use std::str::FromStr;
use std::sync::Arc;

mod message;

#[derive(Clone)]
pub struct SqliteDatabase {
	pool: SqlitePool,
}

impl SqliteDatabase {
	pub async fn connect(database_url: &str) -> Result<Self, DatabaseError> {
		let options = SqliteConnectOptions::from_str(database_url).connection_error("Invalid SQLite database URL")?;
		// In-memory databases vanish with their last connection, so idle connections are never reaped.
		let pool = SqlitePoolOptions::new()
			.idle_timeout(None)
			.max_lifetime(None)
			.connect_with(options)
			.await
			.connection_error("Failed to connect to database")?;
		let store = Self { pool };

		Ok(store)
	}
}

#[async_trait]
impl Database for SqliteDatabase {
	async fn migrate(&mut self) -> Result<(), DatabaseError> {
		migrate!().run(&self.pool).await.map_err(Into::into)
	}

	async fn connection(&self) -> Result<Box<dyn Connection>, DatabaseError> {
		self.pool
			.acquire()
			.await
			.map(|connection| Box::new(connection) as Box<dyn Connection>)
			.map_err(Into::into)
	}

	fn repository(&self) -> Arc<dyn Repository> {
		Arc::new(SqliteRepository)
	}

	async fn close(&self) {
		self.pool.close().await;
	}
}

impl Connection for PoolConnection<Sqlite> {}

#[derive(Default, Clone, Copy)]
pub struct SqliteRepository;

impl Repository for SqliteRepository {
	fn message(&self) -> &dyn MessageRepository {
		self
	}
}

fn sqlite_connection(connection: &mut dyn Connection) -> Result<&mut SqliteConnection, DatabaseError> {
	let type_name = connection.type_name();

	let connection: &mut dyn Any = connection;
	connection
		.downcast_mut::<PoolConnection<Sqlite>>()
		.map(DerefMut::deref_mut)
		.ok_or_else(|| DatabaseError::DatabaseMismatch(anyhow!("Expected SQLite connection, got {type_name}")))
}
