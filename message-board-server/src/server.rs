use crate::context::ApplicationContext;
use crate::server::rest_api::api_docs::api_docs;
use crate::server::rest_api::error::{expose_error_details, panic_response, route_not_found};
use crate::server::rest_api::rest_api;
use axum::Router;
use axum::middleware::map_response_with_state;
use axum::routing::get;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

mod frontend;
pub mod rest_api;

/// Open requests get this long to finish once shutdown has been requested.
const GRACEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn run_server(application_context: ApplicationContext) -> std::io::Result<()> {
	let address = application_context.configuration.address;
	let connection_manager = application_context.connection_manager.clone();
	let router = create_router(application_context);

	let handle = axum_server::Handle::new();
	tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

	info!(%address, "Listening for requests");
	axum_server::bind(address)
		.handle(handle)
		.serve(router.into_make_service())
		.await?;

	connection_manager.close().await;
	info!("Server stopped");
	Ok(())
}

pub fn create_router(application_context: ApplicationContext) -> Router {
	let routes = Router::new()
		.route("/", get(api_docs))
		.route("/app", get(frontend::index))
		.route("/app/", get(frontend::index))
		.route("/app/{*path}", get(frontend::file))
		.nest("/api", rest_api());

	with_middleware(routes, application_context)
}

/// Applies the fallbacks and layers every route shares.
pub(crate) fn with_middleware(routes: Router<ApplicationContext>, application_context: ApplicationContext) -> Router {
	routes
		.fallback(route_not_found)
		.method_not_allowed_fallback(route_not_found)
		.layer(CatchPanicLayer::custom(panic_response))
		.layer(map_response_with_state(application_context.clone(), expose_error_details))
		.layer(CorsLayer::permissive())
		.with_state(application_context)
}

async fn shutdown_on_ctrl_c(handle: axum_server::Handle<std::net::SocketAddr>) {
	if let Err(error) = tokio::signal::ctrl_c().await {
		error!(%error, "Failed to listen for shutdown signal");
		return;
	}

	info!("Shutting down");
	handle.graceful_shutdown(Some(GRACEFUL_SHUTDOWN_TIMEOUT));
}
