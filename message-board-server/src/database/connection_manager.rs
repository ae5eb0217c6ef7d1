use crate::database::error::DatabaseError;
use crate::database::{Database, open};
use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use static_assertions::assert_obj_safe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Produces a freshly opened and migrated database.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
	async fn connect(&self) -> Result<Arc<dyn Database>, DatabaseError>;
}

assert_obj_safe!(Connector);

pub struct DatabaseUrlConnector {
	database_url: String,
}

impl DatabaseUrlConnector {
	pub fn new(database_url: impl Into<String>) -> Self {
		Self {
			database_url: database_url.into(),
		}
	}
}

#[async_trait]
impl Connector for DatabaseUrlConnector {
	async fn connect(&self) -> Result<Arc<dyn Database>, DatabaseError> {
		open(&self.database_url).await
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
	Connected,
	Disconnected,
}

/// Owns the one database handle shared by every request.
///
/// Connecting never gives up: failed attempts are logged and retried after `retry_interval`.
#[derive(Clone)]
pub struct ConnectionManager {
	inner: Arc<Inner>,
}

struct Inner {
	connector: Box<dyn Connector>,
	retry_interval: Duration,
	database: RwLock<Option<Arc<dyn Database>>>,
}

impl ConnectionManager {
	pub fn new(connector: impl Connector, retry_interval: Duration) -> Self {
		Self {
			inner: Arc::new(Inner {
				connector: Box::new(connector),
				retry_interval,
				database: RwLock::default(),
			}),
		}
	}

	pub async fn connect(&self) {
		if self.is_ready() {
			return;
		}

		let retry_interval = self.inner.retry_interval;
		let mut attempt = 1_u64;
		loop {
			match self.inner.connector.connect().await {
				Ok(database) => {
					*self.inner.database.write() = Some(database);
					info!(attempt, "Connected to database");
					return;
				}
				Err(error) => {
					warn!(attempt, %error, ?retry_interval, "Failed to connect to database, retrying");
				}
			}

			tokio::time::sleep(retry_interval).await;
			attempt += 1;
		}
	}

	/// Connects in the background so that requests can be served while the database is unavailable.
	pub fn spawn_connect(&self) -> JoinHandle<()> {
		let connection_manager = self.clone();
		tokio::spawn(async move { connection_manager.connect().await })
	}

	pub fn is_ready(&self) -> bool {
		self.inner.database.read().is_some()
	}

	pub fn status(&self) -> ConnectionStatus {
		if self.is_ready() {
			ConnectionStatus::Connected
		} else {
			ConnectionStatus::Disconnected
		}
	}

	pub fn database(&self) -> Result<Arc<dyn Database>, DatabaseError> {
		self.inner
			.database
			.read()
			.clone()
			.ok_or_else(|| DatabaseError::Connection(anyhow!("Database is not connected")))
	}

	pub async fn close(&self) {
		let database = self.inner.database.write().take();
		if let Some(database) = database {
			database.close().await;
			info!("Closed database connection");
		}
	}
}
