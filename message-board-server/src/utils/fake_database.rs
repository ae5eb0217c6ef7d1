use crate::database::connection_manager::Connector;
use crate::database::error::DatabaseError;
use crate::database::{Connection, Database, Repository};
use crate::message::model::Message;
use crate::message::pagination::ListParameters;
use crate::message::repository::MessageRepository;
use crate::types::date_time::DateTime;
use crate::types::uuid::Uuid;
use anyhow::anyhow;
use async_trait::async_trait;
use std::future::pending;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Database without storage whose connections only work with its own repository.
pub struct FakeDatabase {
	repository: Arc<dyn Repository>,
}

impl FakeDatabase {
	/// Every repository query hangs forever.
	pub fn stalled() -> Arc<dyn Database> {
		Arc::new(Self {
			repository: Arc::new(StalledRepository),
		})
	}
}

#[async_trait]
impl Database for FakeDatabase {
	async fn migrate(&mut self) -> Result<(), DatabaseError> {
		Ok(())
	}

	async fn connection(&self) -> Result<Box<dyn Connection>, DatabaseError> {
		Ok(Box::new(FakeConnection))
	}

	fn repository(&self) -> Arc<dyn Repository> {
		self.repository.clone()
	}

	async fn close(&self) {}
}

pub struct FakeConnection;

impl Connection for FakeConnection {}

pub struct StalledRepository;

impl Repository for StalledRepository {
	fn message(&self) -> &dyn MessageRepository {
		self
	}
}

#[async_trait]
impl MessageRepository for StalledRepository {
	async fn get(&self, _connection: &mut dyn Connection, _id: Uuid) -> Result<Option<Message>, DatabaseError> {
		pending().await
	}

	async fn create(
		&self,
		_connection: &mut dyn Connection,
		_sender: &str,
		_content: &str,
		_created_at: DateTime,
	) -> Result<Message, DatabaseError> {
		pending().await
	}

	async fn update_content(
		&self,
		_connection: &mut dyn Connection,
		_id: Uuid,
		_content: &str,
		_updated_at: DateTime,
	) -> Result<Option<Message>, DatabaseError> {
		pending().await
	}

	async fn remove(&self, _connection: &mut dyn Connection, _id: Uuid) -> Result<bool, DatabaseError> {
		pending().await
	}

	async fn list(
		&self,
		_connection: &mut dyn Connection,
		_parameters: &ListParameters,
	) -> Result<Vec<Message>, DatabaseError> {
		pending().await
	}

	async fn count(&self, _connection: &mut dyn Connection, _sender: Option<&str>) -> Result<u64, DatabaseError> {
		pending().await
	}
}

/// Fails a given number of times before handing out its database.
#[derive(Clone)]
pub struct FakeConnector {
	database: Arc<dyn Database>,
	remaining_failures: Arc<AtomicUsize>,
	attempts: Arc<AtomicUsize>,
}

impl FakeConnector {
	pub fn failing(failures: usize, database: Arc<dyn Database>) -> Self {
		Self {
			database,
			remaining_failures: Arc::new(AtomicUsize::new(failures)),
			attempts: Arc::default(),
		}
	}

	pub fn succeeding(database: Arc<dyn Database>) -> Self {
		Self::failing(0, database)
	}

	pub fn attempts(&self) -> usize {
		self.attempts.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl Connector for FakeConnector {
	async fn connect(&self) -> Result<Arc<dyn Database>, DatabaseError> {
		self.attempts.fetch_add(1, Ordering::SeqCst);

		let failed = self
			.remaining_failures
			.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| remaining.checked_sub(1))
			.is_ok();
		if failed {
			return Err(DatabaseError::Connection(anyhow!("Connection refused")));
		}

		Ok(self.database.clone())
	}
}
