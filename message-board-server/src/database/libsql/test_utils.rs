use crate::database::libsql::{LibSqlDatabase, LibSqlRepository};
use crate::database::test::TestFactory;
use crate::database::{Connection, Database, Repository};
use std::sync::Arc;

pub struct LibSqlTestFactory;

impl TestFactory for LibSqlTestFactory {
	async fn connection() -> Box<dyn Connection> {
		Self::database()
			.await
			.connection()
			.await
			.expect("Failed to connect to database")
	}

	async fn database() -> Arc<dyn Database> {
		let mut database = LibSqlDatabase::open(":memory:")
			.await
			.expect("Failed to open in-memory libSQL database");
		database.migrate().await.expect("Failed to migrate database");

		Arc::new(database)
	}

	fn repository() -> Arc<dyn Repository> {
		Arc::new(LibSqlRepository)
	}
}
