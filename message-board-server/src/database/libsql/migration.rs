use crate::database::Connection;
use crate::database::error::DatabaseError;
use crate::database::libsql::libsql_connection;
use rust_embed::RustEmbed;
use std::collections::BTreeMap;
use tracing::info;

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/migrations"]
struct Migrations;

/// Applies every embedded migration that isn't recorded in `_migrations` yet, in file name order.
pub async fn run_migrations(connection: &mut dyn Connection) -> Result<(), DatabaseError> {
	let connection = libsql_connection(connection)?;
	let migrations = Migrations::iter()
		.filter_map(|file_name| Migrations::get(&file_name).map(|file| (file_name, file)))
		.collect::<BTreeMap<_, _>>();

	let transaction = connection.transaction().await?;
	transaction
		.execute(
			"CREATE TABLE IF NOT EXISTS _migrations (name TEXT PRIMARY KEY NOT NULL, applied_at TEXT NOT NULL)",
			(),
		)
		.await?;

	for (name, migration) in &migrations {
		let mut applied = transaction
			.query("SELECT 1 FROM _migrations WHERE name = ?1", [name.to_string()])
			.await?;
		if applied.next().await?.is_some() {
			continue;
		}

		let sql =
			std::str::from_utf8(migration.data.as_ref()).map_err(|error| DatabaseError::Migration(error.into()))?;
		transaction.execute_batch(sql).await?;
		transaction
			.execute(
				"INSERT INTO _migrations (name, applied_at) VALUES (?1, datetime('now'))",
				[name.to_string()],
			)
			.await?;
		info!(migration = %name, "Applied migration");
	}
	transaction.commit().await?;

	Ok(())
}
