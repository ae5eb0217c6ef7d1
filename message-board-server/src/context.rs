use crate::configuration::Configuration;
use crate::database::connection_manager::{ConnectionManager, DatabaseUrlConnector};
use crate::message::MessageService;
use axum::extract::FromRef;

#[derive(Clone, FromRef)]
pub struct ApplicationContext {
	pub configuration: Configuration,
	pub connection_manager: ConnectionManager,
	pub message_service: MessageService,
}

impl ApplicationContext {
	/// Doesn't connect to the database yet, see [`ConnectionManager::spawn_connect`].
	pub fn new(configuration: Configuration) -> Self {
		let connection_manager = ConnectionManager::new(
			DatabaseUrlConnector::new(configuration.database.url.clone()),
			configuration.database.retry_interval,
		);

		Self::with_connection_manager(configuration, connection_manager)
	}

	pub fn with_connection_manager(configuration: Configuration, connection_manager: ConnectionManager) -> Self {
		let message_service = MessageService::new(connection_manager.clone(), configuration.database.query_timeout);

		Self {
			configuration,
			connection_manager,
			message_service,
		}
	}
}
