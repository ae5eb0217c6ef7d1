use crate::configuration::{Configuration, ConfigurationOverrides};
use crate::context::ApplicationContext;
use crate::error::MessageBoardError;
use crate::server::run_server;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(clap::Parser)]
#[command(version, about)]
pub struct Commandline {
	#[arg(short = 'c', long = "config-file", default_value = "configuration.toml")]
	pub configuration_file_path: String,
	#[command(flatten)]
	pub overrides: ConfigurationOverrides,
	#[command(subcommand)]
	pub command: Option<BaseCommand>,
}

#[derive(clap::Subcommand, Default)]
pub enum BaseCommand {
	/// Run the message board server
	#[default]
	Run,
	/// Print the effective configuration
	Configuration,
}

impl Commandline {
	pub async fn run(self) -> Result<(), MessageBoardError> {
		let mut configuration = Configuration::from_file(&self.configuration_file_path)?;
		configuration.apply(self.overrides);

		match self.command.unwrap_or_default() {
			BaseCommand::Run => {
				init_logging(&configuration.log_filters)?;
				info!(
					address = %configuration.address,
					environment = %configuration.environment,
					"Starting message board server"
				);

				let application_context = ApplicationContext::new(configuration);
				application_context.connection_manager.spawn_connect();
				run_server(application_context).await?;
			}
			BaseCommand::Configuration => println!("{configuration:#?}"),
		}
		Ok(())
	}
}

fn init_logging(log_filters: &str) -> Result<(), MessageBoardError> {
	tracing_subscriber::registry()
		.with(EnvFilter::try_new(log_filters)?)
		.with(fmt::layer())
		.init();
	Ok(())
}
