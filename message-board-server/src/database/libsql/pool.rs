use deadpool::managed::{Manager, Metrics, Object, Pool, RecycleError, RecycleResult};

pub type LibSqlPool = Pool<LibSqlManager, Object<LibSqlManager>>;

pub struct LibSqlManager {
	database: libsql::Database,
}

impl LibSqlManager {
	pub fn new(database: libsql::Database) -> Self {
		Self { database }
	}
}

impl Manager for LibSqlManager {
	type Type = libsql::Connection;
	type Error = libsql::Error;

	async fn create(&self) -> Result<Self::Type, Self::Error> {
		self.database.connect()
	}

	/// Connections are only handed out again after they answered a ping.
	async fn recycle(&self, connection: &mut Self::Type, _metrics: &Metrics) -> RecycleResult<Self::Error> {
		let mut rows = connection.query("SELECT 1", ()).await?;
		let Some(first) = rows.next().await? else {
			return Err(RecycleError::Message("Ping query returned zero results".into()));
		};

		if first.get::<i64>(0)? != 1 {
			return Err(RecycleError::Message("Ping query returned unexpected result".into()));
		}

		Ok(())
	}
}
